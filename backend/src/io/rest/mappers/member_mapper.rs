use crate::domain::commands::members::{MemberCommand, MemberPage};
use crate::domain::models::member::Member as DomainMember;
use shared::{Member as SharedMember, MemberListResponse, MemberRequest, PaginationInfo};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Mapper between member DTOs and domain types.
pub struct MemberMapper;

impl MemberMapper {
    pub fn to_dto(domain: DomainMember) -> SharedMember {
        SharedMember {
            id: domain.id.to_string(),
            cooperative_id: domain.cooperative_id,
            id_card: domain.id_card,
            account_year: domain.account_year,
            member_id: domain.member_id,
            full_name: domain.full_name,
            nationality: domain.nationality,
            shares_num: domain.shares_num,
            shares_value: domain.shares_value,
            joining_date: domain.joining_date.map(|d| d.format(DATE_FORMAT).to_string()),
            member_type: domain.member_type,
            leaving_date: domain.leaving_date.map(|d| d.format(DATE_FORMAT).to_string()),
            address: domain.address,
            moo: domain.moo,
            subdistrict: domain.subdistrict,
            district: domain.district,
            province: domain.province,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_command(dto: MemberRequest) -> MemberCommand {
        MemberCommand {
            cooperative_id: dto.cooperative_id,
            id_card: dto.id_card,
            account_year: dto.account_year,
            member_id: dto.member_id,
            full_name: dto.full_name,
            nationality: dto.nationality,
            shares_num: dto.shares_num,
            shares_value: dto.shares_value,
            joining_date: dto.joining_date,
            member_type: dto.member_type,
            leaving_date: dto.leaving_date,
            address: dto.address,
            moo: dto.moo,
            subdistrict: dto.subdistrict,
            district: dto.district,
            province: dto.province,
        }
    }

    pub fn to_list_dto(page: MemberPage) -> MemberListResponse {
        MemberListResponse {
            data: page.members.into_iter().map(Self::to_dto).collect(),
            pagination: PaginationInfo {
                page: page.page.page,
                limit: page.page.limit,
                total: page.total,
                total_pages: page.total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    #[test]
    fn test_to_dto_formats_dates() {
        let domain = DomainMember {
            id: Uuid::new_v4(),
            cooperative_id: "0105555000001".to_string(),
            id_card: "1234567890123".to_string(),
            account_year: "2025".to_string(),
            member_id: "42".to_string(),
            full_name: "Somchai Jaidee".to_string(),
            nationality: "ไทย".to_string(),
            shares_num: 10.0,
            shares_value: 1000.0,
            joining_date: NaiveDate::from_ymd_opt(2025, 3, 7),
            member_type: 1,
            leaving_date: None,
            address: "1".to_string(),
            moo: 2,
            subdistrict: "Suthep".to_string(),
            district: "Mueang".to_string(),
            province: "Chiang Mai".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let dto = MemberMapper::to_dto(domain.clone());
        assert_eq!(dto.id, domain.id.to_string());
        assert_eq!(dto.joining_date.as_deref(), Some("2025-03-07"));
        assert_eq!(dto.leaving_date, None);
    }
}
