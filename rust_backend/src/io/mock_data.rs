//! Demo dataset generator.
//!
//! Produces rows shaped like a real Chinese-header packing export so the
//! reports can be exercised without an upload.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::domain::RawRecord;

pub const DEMO_WORKERS: [&str; 5] = ["张三", "李四", "王五", "赵六", "钱七"];
pub const DEMO_HOURS: i64 = 24;

const SOURCES: [&str; 4] = ["京东", "淘宝", "天猫", "拼多多"];

/// Generate a reproducible demo dataset ending at `now`.
///
/// Every worker packs 5 to 15 packages in each of the 24 hourly slots going
/// back from `now`; each package holds 1 to 5 items.
pub fn generate(seed: u64, now: DateTime<Utc>) -> Vec<RawRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::new();

    for offset in 0..DEMO_HOURS {
        let completed_at = now - Duration::hours(offset);
        let timestamp = completed_at.to_rfc3339_opts(SecondsFormat::Millis, true);
        let stamp = completed_at.timestamp_millis();

        for worker in DEMO_WORKERS {
            let package_count: u32 = rng.gen_range(5..=15);
            for seq in 0..package_count {
                let item_count: i64 = rng.gen_range(1..=5);
                let source = SOURCES[rng.gen_range(0..SOURCES.len())];
                records.push(
                    RawRecord::new()
                        .with("订单号", format!("ORD{}-{}", stamp, seq))
                        .with("包裹号", format!("PKG{}-{}", stamp, seq))
                        .with("订单来源", source)
                        .with("包裹状态", "已完成")
                        .with("打包操作人", worker)
                        .with("打包完成时间", timestamp.clone())
                        .with("商品数量", item_count),
                );
            }
        }
    }

    records
}
