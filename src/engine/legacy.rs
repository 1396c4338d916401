// ==========================================
// 搬家估算引擎 - 按件费率估算（旧版契约）
// ==========================================
// 与固定分箱型工时表并存,两者口径不同,不要合并:
// - 主引擎: 历史固定费率（每种纸箱单独分钟数 + 每间房开销）
// - 本模块: 调用方配置的单一每箱分钟数,按人数分摊
// ==========================================

use crate::domain::estimate::BoxCounts;
use crate::domain::request::{BoxQuantity, EstimationRequest, FlatRateEstimate, RateConfig};
use crate::domain::types::{PackingIntensity, RoomType};
use crate::engine::tables::room_allocation;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// 汇总纸箱数量
///
/// 同一类型可出现多次,数量累加;未出现的类型为 0
pub fn summarize_boxes(quantities: &[BoxQuantity]) -> BoxCounts {
    let mut counts = BoxCounts::ZERO;
    for q in quantities {
        let field = counts.get_mut(q.box_type);
        *field = field.saturating_add(q.quantity);
    }
    counts
}

/// 房间计数 → 纸箱数量（房间数 × 模板,按打包强度逐字段取整）
///
/// 不套用房屋类型的固定房间集合,也不钳制数量
pub fn counts_for_rooms(
    rooms: &BTreeMap<RoomType, u32>,
    packing_intensity: PackingIntensity,
) -> BoxCounts {
    let mut counts = BoxCounts::ZERO;
    for (room, n) in rooms {
        counts += room_allocation(*room).times(*n);
    }
    counts.scaled(packing_intensity.multiplier())
}

/// 按单一费率计算分钟数
pub fn flat_rate_minutes(rates: &RateConfig, counts: &BoxCounts, workers: u32) -> FlatRateEstimate {
    let total_boxes = counts.total();
    let pack_minutes = total_boxes.saturating_mul(rates.minutes_per_box_pack);
    let unpack_minutes = total_boxes.saturating_mul(rates.minutes_per_box_unpack);
    let workers = workers.max(1);

    FlatRateEstimate {
        counts: *counts,
        total_boxes,
        pack_minutes,
        unpack_minutes,
        workers,
        crew_pack_minutes: pack_minutes.div_ceil(workers),
        crew_unpack_minutes: unpack_minutes.div_ceil(workers),
    }
}

/// 纸箱清单 + 费率 → 按件费率估算
pub fn summarize_boxes_with_rates(
    quantities: &[BoxQuantity],
    rates: &RateConfig,
    workers: u32,
) -> FlatRateEstimate {
    flat_rate_minutes(rates, &summarize_boxes(quantities), workers)
}

/// 经校验请求的按件费率估算
#[instrument(skip(request), level = "debug", fields(workers = request.input.workers))]
pub fn estimate_flat_rate(request: &EstimationRequest) -> FlatRateEstimate {
    let counts = counts_for_rooms(&request.input.rooms, request.input.packing_intensity);
    let estimate = flat_rate_minutes(&request.config, &counts, request.input.workers);
    debug!(
        total_boxes = estimate.total_boxes,
        pack_minutes = estimate.pack_minutes,
        unpack_minutes = estimate.unpack_minutes,
        "按件费率估算完成"
    );
    estimate
}
