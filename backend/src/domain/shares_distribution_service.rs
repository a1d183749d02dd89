use std::sync::Arc;
use tracing::info;

use crate::domain::errors::DomainResult;
use crate::domain::models::dashboard::{percent_of, ValueBucketSlice};
use crate::domain::models::member::{MemberFilter, ShareValueRange};
use crate::storage::MemberStorage;

/// A labelled share value range
#[derive(Debug, Clone, Copy)]
pub struct ValueBucket {
    pub label: &'static str,
    pub range: ShareValueRange,
}

/// The fixed buckets, in display order. Each range is `lower < value <= upper`,
/// so exactly 10000 lands in the first bucket.
pub const VALUE_BUCKETS: [ValueBucket; 4] = [
    ValueBucket {
        label: "< 1หมื่น",
        range: ShareValueRange { lower_exclusive: None, upper_inclusive: Some(10_000.0) },
    },
    ValueBucket {
        label: "1หมื่น-5หมื่น",
        range: ShareValueRange { lower_exclusive: Some(10_000.0), upper_inclusive: Some(50_000.0) },
    },
    ValueBucket {
        label: "5หมื่น-1แสน",
        range: ShareValueRange { lower_exclusive: Some(50_000.0), upper_inclusive: Some(100_000.0) },
    },
    ValueBucket {
        label: "> 1แสน",
        range: ShareValueRange { lower_exclusive: Some(100_000.0), upper_inclusive: None },
    },
];

#[derive(Clone)]
pub struct SharesDistributionService {
    store: Arc<dyn MemberStorage>,
}

impl SharesDistributionService {
    pub fn new(store: Arc<dyn MemberStorage>) -> Self {
        Self { store }
    }

    /// Count and whole-number share for each bucket. All four buckets are
    /// always present, in order.
    pub async fn shares_distribution(&self, filter: &MemberFilter) -> DomainResult<Vec<ValueBucketSlice>> {
        info!("Computing shares distribution: filter={:?}", filter);

        let total = self.store.count_members(filter).await?;

        let mut slices = Vec::with_capacity(VALUE_BUCKETS.len());
        for bucket in VALUE_BUCKETS.iter() {
            let count = self.store.count_in_value_range(filter, &bucket.range).await?;
            slices.push(ValueBucketSlice {
                label: bucket.label.to_string(),
                count,
                percent: percent_of(count, total, 0),
            });
        }

        Ok(slices)
    }
}
