// ==========================================
// 搬家估算引擎 - 静态查表
// ==========================================
// 房间 → 纸箱分配表 / 打包、拆包每箱分钟表
// 下游报价依赖精确数值,修改需同步产品口径
// ==========================================

use crate::domain::estimate::BoxCounts;
use crate::domain::types::{BoxType, RoomType};

// ==========================================
// 房间纸箱分配表（单间）
// ==========================================
// 列顺序: small, medium, large, wardrobe, dishPack, mattressBag, tvBox
pub const BEDROOM_BOXES: BoxCounts = BoxCounts::new(4, 6, 2, 2, 1, 1, 1);
pub const LIVING_ROOM_BOXES: BoxCounts = BoxCounts::new(3, 5, 3, 1, 1, 0, 1);
pub const KITCHEN_BOXES: BoxCounts = BoxCounts::new(4, 6, 2, 0, 3, 0, 0);
pub const DINING_ROOM_BOXES: BoxCounts = BoxCounts::new(2, 3, 2, 0, 1, 0, 0);
pub const GARAGE_BOXES: BoxCounts = BoxCounts::new(5, 7, 3, 0, 1, 0, 0);
pub const OFFICE_BOXES: BoxCounts = BoxCounts::new(3, 4, 2, 0, 1, 0, 1);
pub const PATIO_SHED_BOXES: BoxCounts = BoxCounts::new(2, 3, 3, 0, 1, 0, 0);
pub const ATTIC_BASEMENT_BOXES: BoxCounts = BoxCounts::new(3, 5, 3, 0, 1, 0, 0);

/// 单间房的典型纸箱需求
pub fn room_allocation(room: RoomType) -> &'static BoxCounts {
    match room {
        RoomType::Bedroom => &BEDROOM_BOXES,
        RoomType::LivingRoom => &LIVING_ROOM_BOXES,
        RoomType::Kitchen => &KITCHEN_BOXES,
        RoomType::DiningRoom => &DINING_ROOM_BOXES,
        RoomType::Garage => &GARAGE_BOXES,
        RoomType::Office => &OFFICE_BOXES,
        RoomType::PatioShed => &PATIO_SHED_BOXES,
        RoomType::AtticBasement => &ATTIC_BASEMENT_BOXES,
    }
}

// ==========================================
// 每箱分钟表
// ==========================================

/// 分箱型分钟表 + 每间房固定开销
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteTable {
    /// 每个纸箱类型的分钟数（复用 BoxCounts 的字段布局）
    pub per_box: BoxCounts,
    /// 每间房额外分钟（搭建/收尾）
    pub extra_per_room: u32,
}

impl MinuteTable {
    pub fn minutes_for(&self, box_type: BoxType) -> u32 {
        self.per_box.get(box_type)
    }

    /// Σ counts[type] × minutes[type]
    pub fn weighted_sum(&self, counts: &BoxCounts) -> u64 {
        counts
            .iter()
            .map(|(box_type, n)| n as u64 * self.minutes_for(box_type) as u64)
            .sum()
    }
}

/// 打包分钟表
pub const PACK_MINUTES: MinuteTable = MinuteTable {
    per_box: BoxCounts::new(5, 7, 9, 10, 14, 5, 6),
    extra_per_room: 15,
};

/// 拆包分钟表
pub const UNPACK_MINUTES: MinuteTable = MinuteTable {
    per_box: BoxCounts::new(4, 6, 8, 8, 12, 4, 5),
    extra_per_room: 15,
};
