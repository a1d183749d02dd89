use crate::domain::models::dashboard::{
    DashboardOverview as DomainOverview, GrowthPoint as DomainGrowthPoint, KpiSnapshot as DomainKpi,
    SubdistrictSlice as DomainSubdistrictSlice, ValueBucketSlice as DomainValueBucketSlice,
};
use shared::{
    DashboardCharts, DashboardOverview, GrowthPoint, KpiSnapshot, MembersThisYear, SubdistrictSlice,
    ValueBucketSlice,
};

/// Mapper from dashboard aggregates to their wire format.
pub struct DashboardMapper;

impl DashboardMapper {
    pub fn to_dto(domain: DomainOverview) -> DashboardOverview {
        DashboardOverview {
            kpi: Self::kpi_to_dto(domain.kpi),
            charts: DashboardCharts {
                membership_growth: domain.membership_growth.into_iter().map(Self::growth_to_dto).collect(),
                member_count_by_subdistrict: domain
                    .member_count_by_subdistrict
                    .into_iter()
                    .map(Self::subdistrict_to_dto)
                    .collect(),
                shares_distribution: domain.shares_distribution.into_iter().map(Self::bucket_to_dto).collect(),
            },
        }
    }

    fn kpi_to_dto(kpi: DomainKpi) -> KpiSnapshot {
        KpiSnapshot {
            total_members: kpi.total_members,
            total_shares: kpi.total_shares,
            average_shares_per_person: kpi.average_shares_per_person,
            members_this_year: MembersThisYear {
                current_count: kpi.members_this_year.current_count,
                last_year_count: kpi.members_this_year.last_year_count,
                member_change: kpi.members_this_year.delta,
            },
        }
    }

    fn growth_to_dto(point: DomainGrowthPoint) -> GrowthPoint {
        GrowthPoint {
            year: point.presentation_year,
            count: point.count,
        }
    }

    fn subdistrict_to_dto(slice: DomainSubdistrictSlice) -> SubdistrictSlice {
        SubdistrictSlice {
            subdistrict: slice.subdistrict,
            count: slice.count,
            percent: slice.percent,
        }
    }

    fn bucket_to_dto(slice: DomainValueBucketSlice) -> ValueBucketSlice {
        ValueBucketSlice {
            bucket: slice.label,
            member_count: slice.count,
            percentage: slice.percent,
        }
    }
}
