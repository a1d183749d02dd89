/// Counts of members who joined this calendar year versus last year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MembersThisYearStats {
    pub current_count: i64,
    pub last_year_count: i64,
    pub delta: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KpiSnapshot {
    pub total_members: i64,
    pub total_shares: f64,
    pub average_shares_per_person: f64,
    pub members_this_year: MembersThisYearStats,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthPoint {
    pub presentation_year: i32,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubdistrictSlice {
    pub subdistrict: String,
    pub count: i64,
    /// Two-decimal percentage of the filtered total
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueBucketSlice {
    pub label: String,
    pub count: i64,
    /// Whole-number percentage of the filtered total
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOverview {
    pub kpi: KpiSnapshot,
    pub membership_growth: Vec<GrowthPoint>,
    pub member_count_by_subdistrict: Vec<SubdistrictSlice>,
    pub shares_distribution: Vec<ValueBucketSlice>,
}

/// Round half-up to `decimals` places.
///
/// Inputs are counts, sums and percentages, never negative, so rounding
/// half away from zero is the same as half-up.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Share of `count` in `total` as a percentage rounded to `decimals` places.
///
/// A zero total yields 0 rather than NaN.
pub fn percent_of(count: i64, total: i64, decimals: i32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(count as f64 / total as f64 * 100.0, decimals)
}
