//! Member listing and single-member CRUD.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::calendar::parse_presentation_year;
use crate::domain::commands::members::{MemberCommand, MemberListQuery, MemberPage};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::member::{normalize_criterion, Member, MemberFilter};
use crate::storage::MemberStorage;

const NATURAL_ID_LENGTH: usize = 13;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a textual member id into a UUID.
pub fn parse_member_id(raw: &str) -> DomainResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| DomainError::invalid(format!("Invalid id: '{}'", raw)))
}

#[derive(Clone)]
pub struct MemberService {
    store: Arc<dyn MemberStorage>,
}

impl MemberService {
    pub fn new(store: Arc<dyn MemberStorage>) -> Self {
        Self { store }
    }

    /// Filtered, paginated member listing.
    ///
    /// Returns the total match count together with the requested page,
    /// ordered by `LENGTH(member_id)` and then `member_id`.
    pub async fn list_members(&self, query: MemberListQuery) -> DomainResult<MemberPage> {
        let account_year = normalize_criterion(query.account_year.as_deref())
            .map(|raw| parse_presentation_year(&raw))
            .transpose()?;

        let filter = MemberFilter {
            full_name: normalize_criterion(query.full_name.as_deref()),
            subdistrict: normalize_criterion(query.subdistrict.as_deref()),
            district: normalize_criterion(query.district.as_deref()),
            province: normalize_criterion(query.province.as_deref()),
            account_year,
        };
        let page = query.page;
        info!("Listing members: filter={:?}, page={}, limit={}", filter, page.page, page.limit);

        let total = self.store.count_members(&filter).await?;
        let members = self
            .store
            .list_members(&filter, page.offset(), i64::from(page.limit))
            .await?;

        info!("Found {} of {} members", members.len(), total);

        Ok(MemberPage {
            members,
            page,
            total,
            total_pages: page.total_pages(total),
        })
    }

    pub async fn get_member(&self, id: &str) -> DomainResult<Member> {
        let id = parse_member_id(id)?;
        info!("Getting member: {}", id);

        self.store.get_member(id).await?.ok_or_else(|| {
            warn!("Member not found: {}", id);
            DomainError::not_found("Member not found")
        })
    }

    pub async fn create_member(&self, command: MemberCommand) -> DomainResult<Member> {
        info!("Creating member: member_id={}", command.member_id);

        let fields = validate_command(&command)?;
        self.check_conflicts(&command, None).await?;

        let now = Utc::now();
        let member = Member {
            id: Uuid::new_v4(),
            cooperative_id: command.cooperative_id,
            id_card: command.id_card,
            account_year: fields.account_year,
            member_id: command.member_id,
            full_name: command.full_name,
            nationality: command.nationality,
            shares_num: command.shares_num,
            shares_value: command.shares_value,
            joining_date: Some(fields.joining_date),
            member_type: command.member_type,
            leaving_date: fields.leaving_date,
            address: command.address,
            moo: command.moo,
            subdistrict: command.subdistrict,
            district: command.district,
            province: command.province,
            created_at: now,
            updated_at: now,
        };

        self.store.insert_member(&member).await?;
        info!("Created member {} with ID: {}", member.member_id, member.id);

        Ok(member)
    }

    pub async fn update_member(&self, id: &str, command: MemberCommand) -> DomainResult<Member> {
        let id = parse_member_id(id)?;
        info!("Updating member: {}", id);

        let fields = validate_command(&command)?;
        let existing = self.store.get_member(id).await?.ok_or_else(|| {
            warn!("Member not found for update: {}", id);
            DomainError::not_found("Member not found")
        })?;
        self.check_conflicts(&command, Some(id)).await?;

        let member = Member {
            id,
            cooperative_id: command.cooperative_id,
            id_card: command.id_card,
            account_year: fields.account_year,
            member_id: command.member_id,
            full_name: command.full_name,
            nationality: command.nationality,
            shares_num: command.shares_num,
            shares_value: command.shares_value,
            joining_date: Some(fields.joining_date),
            member_type: command.member_type,
            leaving_date: fields.leaving_date,
            address: command.address,
            moo: command.moo,
            subdistrict: command.subdistrict,
            district: command.district,
            province: command.province,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        self.store.update_member(&member).await?;
        info!("Updated member {}", member.id);

        Ok(member)
    }

    pub async fn delete_member(&self, id: &str) -> DomainResult<()> {
        let id = parse_member_id(id)?;
        info!("Deleting member: {}", id);

        if !self.store.delete_member(id).await? {
            warn!("Member not found for delete: {}", id);
            return Err(DomainError::not_found("Member not found"));
        }
        Ok(())
    }

    async fn check_conflicts(&self, command: &MemberCommand, excluding: Option<Uuid>) -> DomainResult<()> {
        if self.store.find_by_id_card(&command.id_card, excluding).await?.is_some() {
            warn!("Rejected member: duplicate id card");
            return Err(DomainError::conflict("ID card already exists"));
        }

        let compact_name = Member::compact_name(&command.full_name);
        if self.store.find_by_compact_name(&compact_name, excluding).await?.is_some() {
            warn!("Rejected member: duplicate full name {}", command.full_name);
            return Err(DomainError::conflict("Full name already exists"));
        }

        if self.store.find_by_member_id(&command.member_id, excluding).await?.is_some() {
            warn!("Rejected member: duplicate member id {}", command.member_id);
            return Err(DomainError::conflict("Member ID already exists"));
        }

        Ok(())
    }
}

/// Fields derived from a command after validation.
struct ValidatedFields {
    /// Internal-calendar year as text, empty when none was given
    account_year: String,
    joining_date: NaiveDate,
    leaving_date: Option<NaiveDate>,
}

fn validate_command(command: &MemberCommand) -> DomainResult<ValidatedFields> {
    let required = [
        &command.id_card,
        &command.member_id,
        &command.full_name,
        &command.nationality,
    ];
    if required.iter().any(|value| value.trim().is_empty()) {
        return Err(DomainError::invalid(
            "ID card, member ID, full name and nationality are required",
        ));
    }

    if command.cooperative_id.chars().count() != NATURAL_ID_LENGTH {
        return Err(DomainError::invalid("Cooperative ID must be 13 characters"));
    }
    if command.id_card.chars().count() != NATURAL_ID_LENGTH {
        return Err(DomainError::invalid("ID card must be 13 characters"));
    }

    let account_year = if command.account_year.trim().is_empty() {
        String::new()
    } else {
        parse_presentation_year(&command.account_year)?.to_string()
    };

    let joining_date = NaiveDate::parse_from_str(command.joining_date.trim(), DATE_FORMAT)
        .map_err(|_| DomainError::invalid("Joining date must be formatted YYYY-MM-DD"))?;

    // An unparseable leaving date means the person is still a member
    let leaving_date = NaiveDate::parse_from_str(command.leaving_date.trim(), DATE_FORMAT).ok();

    Ok(ValidatedFields {
        account_year,
        joining_date,
        leaving_date,
    })
}
