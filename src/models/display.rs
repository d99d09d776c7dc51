use serde::Serialize;
use std::collections::BTreeMap;

use super::ContentRecord;

/// `ContentRecord` 序列化后的字段名，元数据列不能与之同名
pub const RECORD_FIELDS: &[&str] = &[
    "id",
    "title",
    "description",
    "file_name",
    "file_size",
    "published_year",
    "reviewed_on",
    "copyright",
    "rights_statement",
    "active",
    "duplicatable",
    "metadata",
    "metadata_info",
];

pub fn is_record_field(name: &str) -> bool {
    RECORD_FIELDS.contains(&name)
}

/// 表格展示行
///
/// 在原始记录基础上，为每个需要展示的元数据类型增加一列，
/// 值为该类型下所有标签名称以 ", " 拼接的字符串。
/// 与记录字段同名的类型不生成列。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    #[serde(flatten)]
    pub record: ContentRecord,
    #[serde(flatten)]
    pub metadata_columns: BTreeMap<String, String>,
}

impl DisplayRow {
    pub fn from_record(record: &ContentRecord, displayed_types: &[String]) -> Self {
        let metadata_columns = displayed_types
            .iter()
            .filter(|type_name| !is_record_field(type_name))
            .map(|type_name| {
                let joined = record
                    .tag_names_of_type(type_name)
                    .collect::<Vec<_>>()
                    .join(", ");
                (type_name.clone(), joined)
            })
            .collect();

        Self {
            record: record.clone(),
            metadata_columns,
        }
    }

    /// 取某一元数据列的展示值
    pub fn column(&self, type_name: &str) -> Option<&str> {
        self.metadata_columns.get(type_name).map(String::as_str)
    }
}

/// 由原始记录计算展示行（纯函数）
pub fn build_display_rows(records: &[ContentRecord], displayed_types: &[String]) -> Vec<DisplayRow> {
    records
        .iter()
        .map(|record| DisplayRow::from_record(record, displayed_types))
        .collect()
}
