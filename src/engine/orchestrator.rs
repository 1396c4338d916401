// ==========================================
// 搬家估算引擎 - 组合估算编排器
// ==========================================
// 流程: 纸箱估算 → 工时估算
// 红线: 纯组合,不追加任何规则
// ==========================================

use crate::domain::estimate::{CombinedEstimate, EstimateAllParams, EstimateTimeParams};
use crate::engine::box_estimator::BoxEstimationEngine;
use crate::engine::time_estimator::TimeEstimationEngine;
use tracing::instrument;

// ==========================================
// EstimateOrchestrator - 组合估算编排器
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct EstimateOrchestrator {
    boxes: BoxEstimationEngine,
    time: TimeEstimationEngine,
}

impl EstimateOrchestrator {
    pub fn new() -> Self {
        Self {
            boxes: BoxEstimationEngine::new(),
            time: TimeEstimationEngine::new(),
        }
    }

    /// 执行组合估算
    ///
    /// counts / total_rooms 与单独调用纸箱估算完全一致
    #[instrument(skip(self), level = "debug")]
    pub fn estimate_all(&self, params: &EstimateAllParams) -> CombinedEstimate {
        let boxes = self.boxes.estimate_params(&params.boxes_params());
        let time = self.time.estimate(&EstimateTimeParams {
            counts: boxes.counts,
            total_rooms: boxes.total_rooms,
            service_type: params.service_type.clone(),
        });

        CombinedEstimate::from_parts(boxes, time)
    }
}
