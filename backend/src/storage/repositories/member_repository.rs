use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};
use uuid::Uuid;

use crate::domain::models::member::{LocationField, Member, MemberFilter, ShareValueRange};
use crate::storage::connection::DbConnection;
use crate::storage::traits::MemberStorage;

const MEMBER_COLUMNS: &str = "id, cooperative_id, id_card, account_year, member_id, full_name, \
    nationality, shares_num, shares_value, joining_date, member_type, leaving_date, address, moo, \
    subdistrict, district, province, created_at, updated_at";

/// Repository for member operations
#[derive(Clone)]
pub struct MemberRepository {
    db: DbConnection,
}

impl MemberRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    async fn find_one(&self, column_expr: &str, value: String, excluding: Option<Uuid>) -> Result<Option<Member>> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM members WHERE {} = ",
            MEMBER_COLUMNS, column_expr
        ));
        builder.push_bind(value);
        if let Some(id) = excluding {
            builder.push(" AND id != ");
            builder.push_bind(id.to_string());
        }
        builder.push(" LIMIT 1");

        let row = builder.build().fetch_optional(self.db.pool()).await?;
        row.as_ref().map(member_from_row).transpose()
    }
}

/// Escape LIKE metacharacters and wrap the needle for a substring match.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Lowercased copy of a searchable column.
///
/// SQLite's LIKE only folds ASCII, so text filters match a Rust-folded needle
/// against these shadow columns instead of the originals.
fn fold(value: &str) -> String {
    value.to_lowercase()
}

/// Append the filter as a conjunctive WHERE clause.
///
/// Only present fields contribute a predicate.
fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &MemberFilter) {
    builder.push(" WHERE 1 = 1");

    let text_fields = [
        ("full_name_folded", &filter.full_name),
        ("subdistrict_folded", &filter.subdistrict),
        ("district_folded", &filter.district),
        ("province_folded", &filter.province),
    ];
    for (column, value) in text_fields {
        if let Some(value) = value {
            builder.push(format!(" AND {} LIKE ", column));
            builder.push_bind(like_pattern(&fold(value)));
            builder.push(" ESCAPE '\\'");
        }
    }

    if let Some(year) = filter.account_year {
        builder.push(" AND account_year = ");
        builder.push_bind(year.to_string());
    }
}

fn member_from_row(row: &SqliteRow) -> Result<Member> {
    let id: String = row.try_get("id")?;
    Ok(Member {
        id: Uuid::parse_str(&id).with_context(|| format!("Corrupt member id '{}'", id))?,
        cooperative_id: row.try_get("cooperative_id")?,
        id_card: row.try_get("id_card")?,
        account_year: row.try_get("account_year")?,
        member_id: row.try_get("member_id")?,
        full_name: row.try_get("full_name")?,
        nationality: row.try_get("nationality")?,
        shares_num: row.try_get("shares_num")?,
        shares_value: row.try_get("shares_value")?,
        joining_date: row.try_get("joining_date")?,
        member_type: row.try_get("member_type")?,
        leaving_date: row.try_get("leaving_date")?,
        address: row.try_get("address")?,
        moo: row.try_get("moo")?,
        subdistrict: row.try_get("subdistrict")?,
        district: row.try_get("district")?,
        province: row.try_get("province")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl MemberStorage for MemberRepository {
    async fn count_members(&self, filter: &MemberFilter) -> Result<i64> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM members");
        push_filter(&mut builder, filter);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(self.db.pool())
            .await
            .context("Failed to count members")?;
        Ok(count)
    }

    async fn sum_shares_value(&self, filter: &MemberFilter) -> Result<f64> {
        let mut builder =
            QueryBuilder::<Sqlite>::new("SELECT CAST(COALESCE(SUM(shares_value), 0) AS REAL) FROM members");
        push_filter(&mut builder, filter);

        let total = builder
            .build_query_scalar::<f64>()
            .fetch_one(self.db.pool())
            .await
            .context("Failed to sum shares value")?;
        Ok(total)
    }

    async fn list_members(&self, filter: &MemberFilter, offset: i64, limit: i64) -> Result<Vec<Member>> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM members", MEMBER_COLUMNS));
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY LENGTH(member_id) ASC, member_id ASC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows = builder
            .build()
            .fetch_all(self.db.pool())
            .await
            .context("Failed to list members")?;
        rows.iter().map(member_from_row).collect()
    }

    async fn count_by_subdistrict(&self, filter: &MemberFilter) -> Result<Vec<(String, i64)>> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT subdistrict, COUNT(*) AS member_count FROM members");
        push_filter(&mut builder, filter);
        builder.push(" GROUP BY subdistrict ORDER BY subdistrict ASC");

        let groups = builder
            .build_query_as::<(String, i64)>()
            .fetch_all(self.db.pool())
            .await
            .context("Failed to group members by subdistrict")?;
        Ok(groups)
    }

    async fn count_by_join_year(&self) -> Result<Vec<(i32, i64)>> {
        let rows: Vec<(i64, i64)> = sqlx::query_as(
            r#"
            SELECT CAST(strftime('%Y', joining_date) AS INTEGER) AS join_year, COUNT(*) AS member_count
            FROM members
            WHERE joining_date IS NOT NULL
              AND strftime('%Y', joining_date) IS NOT NULL
            GROUP BY join_year
            ORDER BY join_year ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await
        .context("Failed to group members by join year")?;

        Ok(rows.into_iter().map(|(year, count)| (year as i32, count)).collect())
    }

    async fn count_joined_in_year(&self, year: i32) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM members
            WHERE joining_date IS NOT NULL
              AND CAST(strftime('%Y', joining_date) AS INTEGER) = ?
            "#,
        )
        .bind(year)
        .fetch_one(self.db.pool())
        .await
        .with_context(|| format!("Failed to count members joined in {}", year))?;
        Ok(count)
    }

    async fn count_in_value_range(&self, filter: &MemberFilter, range: &ShareValueRange) -> Result<i64> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM members");
        push_filter(&mut builder, filter);
        if let Some(lower) = range.lower_exclusive {
            builder.push(" AND shares_value > ");
            builder.push_bind(lower);
        }
        if let Some(upper) = range.upper_inclusive {
            builder.push(" AND shares_value <= ");
            builder.push_bind(upper);
        }

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(self.db.pool())
            .await
            .context("Failed to count members in share value range")?;
        Ok(count)
    }

    async fn get_member(&self, id: Uuid) -> Result<Option<Member>> {
        self.find_one("id", id.to_string(), None).await
    }

    async fn find_by_id_card(&self, id_card: &str, excluding: Option<Uuid>) -> Result<Option<Member>> {
        self.find_one("id_card", id_card.to_string(), excluding).await
    }

    async fn find_by_member_id(&self, member_id: &str, excluding: Option<Uuid>) -> Result<Option<Member>> {
        self.find_one("member_id", member_id.to_string(), excluding).await
    }

    async fn find_by_compact_name(&self, compact_name: &str, excluding: Option<Uuid>) -> Result<Option<Member>> {
        self.find_one("REPLACE(full_name, ' ', '')", compact_name.to_string(), excluding)
            .await
    }

    async fn insert_member(&self, member: &Member) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO members (
                id, cooperative_id, id_card, account_year, member_id, full_name, nationality,
                shares_num, shares_value, joining_date, member_type, leaving_date, address, moo,
                subdistrict, district, province, full_name_folded, subdistrict_folded,
                district_folded, province_folded, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(member.id.to_string())
        .bind(&member.cooperative_id)
        .bind(&member.id_card)
        .bind(&member.account_year)
        .bind(&member.member_id)
        .bind(&member.full_name)
        .bind(&member.nationality)
        .bind(member.shares_num)
        .bind(member.shares_value)
        .bind(member.joining_date)
        .bind(member.member_type)
        .bind(member.leaving_date)
        .bind(&member.address)
        .bind(member.moo)
        .bind(&member.subdistrict)
        .bind(&member.district)
        .bind(&member.province)
        .bind(fold(&member.full_name))
        .bind(fold(&member.subdistrict))
        .bind(fold(&member.district))
        .bind(fold(&member.province))
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(self.db.pool())
        .await
        .with_context(|| format!("Failed to insert member {}", member.member_id))?;
        Ok(())
    }

    async fn update_member(&self, member: &Member) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE members
            SET cooperative_id = ?, id_card = ?, account_year = ?, member_id = ?, full_name = ?,
                nationality = ?, shares_num = ?, shares_value = ?, joining_date = ?, member_type = ?,
                leaving_date = ?, address = ?, moo = ?, subdistrict = ?, district = ?, province = ?,
                full_name_folded = ?, subdistrict_folded = ?, district_folded = ?, province_folded = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&member.cooperative_id)
        .bind(&member.id_card)
        .bind(&member.account_year)
        .bind(&member.member_id)
        .bind(&member.full_name)
        .bind(&member.nationality)
        .bind(member.shares_num)
        .bind(member.shares_value)
        .bind(member.joining_date)
        .bind(member.member_type)
        .bind(member.leaving_date)
        .bind(&member.address)
        .bind(member.moo)
        .bind(&member.subdistrict)
        .bind(&member.district)
        .bind(&member.province)
        .bind(fold(&member.full_name))
        .bind(fold(&member.subdistrict))
        .bind(fold(&member.district))
        .bind(fold(&member.province))
        .bind(member.updated_at)
        .bind(member.id.to_string())
        .execute(self.db.pool())
        .await
        .with_context(|| format!("Failed to update member {}", member.id))?;
        Ok(())
    }

    async fn delete_member(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id.to_string())
            .execute(self.db.pool())
            .await
            .with_context(|| format!("Failed to delete member {}", id))?;
        Ok(result.rows_affected() > 0)
    }

    async fn distinct_values(&self, field: LocationField) -> Result<Vec<String>> {
        let column = field.column();
        let values: Vec<String> = sqlx::query_scalar(&format!(
            "SELECT DISTINCT {column} FROM members WHERE {column} <> '' ORDER BY {column} ASC"
        ))
        .fetch_all(self.db.pool())
        .await
        .with_context(|| format!("Failed to list distinct {}", column))?;
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::{sample_member, TestEnvironment};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_insert_and_get_member() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let member = sample_member("7", "Suthep", 2500.0);

        env.members.insert_member(&member).await.expect("Failed to insert member");

        let loaded = env.members.get_member(member.id).await.unwrap().expect("Member should exist");
        assert_eq!(loaded.member_id, "7");
        assert_eq!(loaded.joining_date, member.joining_date);
        assert_eq!(loaded.leaving_date, None);
        assert_eq!(loaded.created_at, member.created_at);

        assert!(env.members.get_member(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_orders_by_length_then_lexicographic() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        for member_id in ["10", "9", "100", "2"] {
            env.members
                .insert_member(&sample_member(member_id, "Suthep", 100.0))
                .await
                .unwrap();
        }

        let page = env.members.list_members(&MemberFilter::default(), 0, 10).await.unwrap();
        let ids: Vec<&str> = page.iter().map(|m| m.member_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "9", "10", "100"]);
    }

    #[tokio::test]
    async fn test_filter_substring_is_case_insensitive_and_escaped() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let mut a = sample_member("1", "Suthep", 100.0);
        a.full_name = "Somchai Jaidee".to_string();
        let mut b = sample_member("2", "Chang Phueak", 100.0);
        b.full_name = "Malee 100%".to_string();
        env.members.insert_member(&a).await.unwrap();
        env.members.insert_member(&b).await.unwrap();

        let filter = MemberFilter {
            full_name: Some("SOMCHAI".to_string()),
            ..MemberFilter::default()
        };
        assert_eq!(env.members.count_members(&filter).await.unwrap(), 1);

        // '%' in user input is a literal, not a wildcard
        let filter = MemberFilter {
            full_name: Some("0%".to_string()),
            ..MemberFilter::default()
        };
        assert_eq!(env.members.count_members(&filter).await.unwrap(), 1);

        let filter = MemberFilter {
            full_name: Some("%".to_string()),
            subdistrict: Some("suthep".to_string()),
            ..MemberFilter::default()
        };
        assert_eq!(env.members.count_members(&filter).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_filter_folds_non_ascii_case() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let mut member = sample_member("1", "Ébène", 100.0);
        member.full_name = "ÉMILE Zola".to_string();
        member.province = "สุราษฎร์ธานี".to_string();
        env.members.insert_member(&member).await.unwrap();

        let filter = MemberFilter {
            full_name: Some("émile".to_string()),
            subdistrict: Some("ÉBÈ".to_string()),
            province: Some("ราษฎร์".to_string()),
            ..MemberFilter::default()
        };
        assert_eq!(env.members.count_members(&filter).await.unwrap(), 1);
        assert_eq!(env.members.list_members(&filter, 0, 10).await.unwrap().len(), 1);

        // Updates keep the folded copies in step
        member.full_name = "Ångström".to_string();
        env.members.update_member(&member).await.unwrap();
        assert_eq!(env.members.count_members(&filter).await.unwrap(), 0);
        let filter = MemberFilter {
            full_name: Some("ÅNGST".to_string()),
            ..MemberFilter::default()
        };
        assert_eq!(env.members.count_members(&filter).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_sum_shares_value_defaults_to_zero() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        assert_eq!(env.members.sum_shares_value(&MemberFilter::default()).await.unwrap(), 0.0);

        env.members.insert_member(&sample_member("1", "Suthep", 1500.5)).await.unwrap();
        env.members.insert_member(&sample_member("2", "Suthep", 500.0)).await.unwrap();
        assert_eq!(env.members.sum_shares_value(&MemberFilter::default()).await.unwrap(), 2000.5);
    }

    #[tokio::test]
    async fn test_count_by_join_year_skips_missing_dates() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let mut a = sample_member("1", "Suthep", 100.0);
        a.joining_date = NaiveDate::from_ymd_opt(2023, 5, 1);
        let mut b = sample_member("2", "Suthep", 100.0);
        b.joining_date = NaiveDate::from_ymd_opt(2021, 1, 31);
        let mut c = sample_member("3", "Suthep", 100.0);
        c.joining_date = NaiveDate::from_ymd_opt(2023, 12, 31);
        let mut d = sample_member("4", "Suthep", 100.0);
        d.joining_date = None;
        for m in [&a, &b, &c, &d] {
            env.members.insert_member(m).await.unwrap();
        }

        let groups = env.members.count_by_join_year().await.unwrap();
        assert_eq!(groups, vec![(2021, 1), (2023, 2)]);
        assert_eq!(env.members.count_joined_in_year(2023).await.unwrap(), 2);
        assert_eq!(env.members.count_joined_in_year(2022).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_count_in_value_range_boundaries() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        for (id, value) in [("1", 10000.0), ("2", 10000.01), ("3", 50000.0)] {
            env.members.insert_member(&sample_member(id, "Suthep", value)).await.unwrap();
        }

        let first = ShareValueRange { lower_exclusive: None, upper_inclusive: Some(10000.0) };
        let second = ShareValueRange { lower_exclusive: Some(10000.0), upper_inclusive: Some(50000.0) };
        let filter = MemberFilter::default();

        assert_eq!(env.members.count_in_value_range(&filter, &first).await.unwrap(), 1);
        assert_eq!(env.members.count_in_value_range(&filter, &second).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_find_conflicts_excluding_self() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let mut member = sample_member("1", "Suthep", 100.0);
        member.full_name = "Somchai Jaidee".to_string();
        env.members.insert_member(&member).await.unwrap();

        assert!(env.members.find_by_compact_name("SomchaiJaidee", None).await.unwrap().is_some());
        assert!(env.members.find_by_compact_name("SomchaiJaidee", Some(member.id)).await.unwrap().is_none());
        assert!(env.members.find_by_id_card(&member.id_card, None).await.unwrap().is_some());
        assert!(env.members.find_by_member_id("1", Some(member.id)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_and_delete_member() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let mut member = sample_member("1", "Suthep", 100.0);
        env.members.insert_member(&member).await.unwrap();

        member.shares_value = 999.0;
        member.leaving_date = NaiveDate::from_ymd_opt(2024, 3, 1);
        env.members.update_member(&member).await.unwrap();

        let loaded = env.members.get_member(member.id).await.unwrap().unwrap();
        assert_eq!(loaded.shares_value, 999.0);
        assert_eq!(loaded.leaving_date, member.leaving_date);

        assert!(env.members.delete_member(member.id).await.unwrap());
        assert!(!env.members.delete_member(member.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_distinct_values_sorted_and_non_empty() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        for (id, subdistrict) in [("1", "Suthep"), ("2", "Chang Phueak"), ("3", "Suthep"), ("4", "")] {
            env.members.insert_member(&sample_member(id, subdistrict, 1.0)).await.unwrap();
        }

        let values = env.members.distinct_values(LocationField::Subdistrict).await.unwrap();
        assert_eq!(values, vec!["Chang Phueak".to_string(), "Suthep".to_string()]);
    }
}
