// ==========================================
// 酒店房价决策支持系统 - 房型 CSV 导入器
// ==========================================
// 职责: 批量导入房型记录,逐行校验,批内去重
// 文件格式: id,name,current_price,occupancy,competitor_prices
//           竞品价格为 ';' 分隔的列表,可为空
// ==========================================

use crate::domain::room::Room;
use crate::importer::error::{ImportError, ImportResult};
use crate::repository::room_repo::RoomRepository;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

// ==========================================
// 导入记录与汇总
// ==========================================

/// CSV 行的原始映射
#[derive(Debug, Deserialize)]
struct RoomCsvRow {
    id: String,
    name: String,
    current_price: f64,
    occupancy: f64,
    #[serde(default)]
    competitor_prices: String,
}

/// 单行导入失败
#[derive(Debug, Clone)]
pub struct ImportRowError {
    /// 数据行号(表头为第 1 行)
    pub row_number: usize,
    /// 失败原因
    pub reason: String,
}

/// 导入汇总
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    /// 读取的数据行总数
    pub total_rows: usize,
    /// 成功入库的房型数
    pub imported: usize,
    /// 跳过的行数(校验失败或重复)
    pub skipped: usize,
    /// 逐行失败明细
    pub errors: Vec<ImportRowError>,
}

// ==========================================
// RoomCsvImporter - 房型 CSV 导入器
// ==========================================
pub struct RoomCsvImporter {
    room_repo: Arc<RoomRepository>,
}

impl RoomCsvImporter {
    /// 创建新的导入器实例
    pub fn new(room_repo: Arc<RoomRepository>) -> Self {
        Self { room_repo }
    }

    /// 从 CSV 文件导入房型
    ///
    /// 逐行校验: id 非空、current_price 为正、occupancy 在 [0,1]、
    /// 竞品价格均为正数;批内重复 id 仅首行生效。
    /// 合法行通过 upsert 入库,非法行跳过并计入汇总。
    ///
    /// # 返回
    /// - Ok(ImportSummary): 导入汇总(文件级错误除外,行级错误不中断)
    pub fn import_file(&self, path: &Path) -> ImportResult<ImportSummary> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut summary = ImportSummary::default();
        let mut first_occurrence: HashMap<String, usize> = HashMap::new();

        for (index, record) in reader.deserialize::<RoomCsvRow>().enumerate() {
            // 表头为第 1 行,数据从第 2 行开始
            let row_number = index + 2;
            summary.total_rows += 1;

            let row = match record {
                Ok(row) => row,
                Err(e) => {
                    summary.skipped += 1;
                    summary.errors.push(ImportRowError {
                        row_number,
                        reason: format!("行解析失败: {}", e),
                    });
                    continue;
                }
            };

            match self.validate_row(&row, row_number, &mut first_occurrence) {
                Ok(room) => {
                    self.room_repo.upsert(&room)?;
                    summary.imported += 1;
                }
                Err(reason) => {
                    summary.skipped += 1;
                    summary.errors.push(ImportRowError { row_number, reason });
                }
            }
        }

        tracing::info!(
            total = summary.total_rows,
            imported = summary.imported,
            skipped = summary.skipped,
            "房型导入完成"
        );
        Ok(summary)
    }

    /// 校验单行并转换为领域实体
    fn validate_row(
        &self,
        row: &RoomCsvRow,
        row_number: usize,
        first_occurrence: &mut HashMap<String, usize>,
    ) -> Result<Room, String> {
        if row.id.is_empty() {
            return Err("id 不能为空".to_string());
        }
        if let Some(first_row) = first_occurrence.get(&row.id) {
            return Err(format!("id 在批内重复,首次出现于第{}行", first_row));
        }

        if !row.current_price.is_finite() || row.current_price <= 0.0 {
            return Err(format!("current_price 必须为正数,实际为 {}", row.current_price));
        }
        if !row.occupancy.is_finite() || !(0.0..=1.0).contains(&row.occupancy) {
            return Err(format!("occupancy 必须在 [0,1],实际为 {}", row.occupancy));
        }

        let competitor_prices = parse_competitor_prices(&row.competitor_prices)?;

        first_occurrence.insert(row.id.clone(), row_number);
        Ok(Room {
            id: row.id.clone(),
            name: row.name.clone(),
            current_price: row.current_price,
            occupancy: row.occupancy,
            competitor_prices,
        })
    }
}

/// 解析 ';' 分隔的竞品价格列表
///
/// 空串/纯空白 → 空列表;任一分段非正数或不可解析 → 整行拒绝
fn parse_competitor_prices(raw: &str) -> Result<Vec<f64>, String> {
    let mut prices = Vec::new();
    for part in raw.split(';') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.parse::<f64>() {
            Ok(price) if price.is_finite() && price > 0.0 => prices.push(price),
            _ => return Err(format!("竞品价格不合法: {}", part)),
        }
    }
    Ok(prices)
}
