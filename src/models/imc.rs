use crate::utils::SourceTimestamp;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{Column, FromRow, Row, TypeInfo};

/// A row of `SELECT id, peso, altura, imc, categoria, fecha, user_id FROM imc`
#[derive(Debug, Clone, PartialEq)]
pub struct ImcRow {
    pub id: i32,
    pub peso: f64,
    pub altura: f64,
    pub imc: f64,
    pub categoria: String,
    pub fecha: SourceTimestamp,
    pub user_id: Option<i32>,
}

/// Document written to the `imc` collection
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ImcDocument {
    #[serde(rename = "_id")]
    pub id: i32,
    pub peso: f64,
    pub altura: f64,
    pub imc: f64,
    pub categoria: String,
    pub fecha: String,  // ISO-8601, see SourceTimestamp::to_iso8601
    pub user_id: Option<i32>,  // not checked against `users`
}

impl From<ImcRow> for ImcDocument {
    fn from(row: ImcRow) -> Self {
        Self {
            id: row.id,
            peso: row.peso,
            altura: row.altura,
            imc: row.imc,
            categoria: row.categoria,
            fecha: row.fecha.to_iso8601(),
            user_id: row.user_id,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for ImcRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            peso: numeric_as_f64(row, "peso")?,
            altura: numeric_as_f64(row, "altura")?,
            imc: numeric_as_f64(row, "imc")?,
            // `categoria` is a PostgreSQL enum; its wire value is the label text
            categoria: row.try_get_unchecked("categoria")?,
            fecha: timestamp_column(row, "fecha")?,
            user_id: row.try_get("user_id")?,
        })
    }
}

fn numeric_as_f64(row: &PgRow, column: &str) -> Result<f64, sqlx::Error> {
    let value: Decimal = row.try_get(column)?;
    value.to_f64().ok_or_else(|| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: format!("numeric value {} does not fit in f64", value).into(),
    })
}

fn timestamp_column(row: &PgRow, column: &str) -> Result<SourceTimestamp, sqlx::Error> {
    let is_zoned = row.try_column(column)?.type_info().name() == "TIMESTAMPTZ";

    if is_zoned {
        let value: DateTime<Utc> = row.try_get(column)?;
        Ok(SourceTimestamp::Zoned(value.fixed_offset()))
    } else {
        let value: NaiveDateTime = row.try_get(column)?;
        Ok(SourceTimestamp::Naive(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mongodb::bson::{self, doc, Bson};

    fn sample_row() -> ImcRow {
        ImcRow {
            id: 1,
            peso: 70.5,
            altura: 1.75,
            imc: 23.0,
            categoria: "normal".to_string(),
            fecha: SourceTimestamp::Naive(
                NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
            ),
            user_id: Some(1),
        }
    }

    #[test]
    fn test_imc_document_shape() {
        let document = bson::to_document(&ImcDocument::from(sample_row())).unwrap();

        assert_eq!(
            document,
            doc! {
                "_id": 1,
                "peso": 70.5,
                "altura": 1.75,
                "imc": 23.0,
                "categoria": "normal",
                "fecha": "2024-01-01T00:00:00",
                "user_id": 1,
            }
        );
        assert_eq!(document.len(), 7);
    }

    #[test]
    fn test_fecha_is_written_as_string() {
        let document = bson::to_document(&ImcDocument::from(sample_row())).unwrap();
        assert!(matches!(document.get("fecha"), Some(Bson::String(_))));
    }

    #[test]
    fn test_dangling_user_id_passes_through() {
        let mut row = sample_row();
        row.user_id = Some(999);

        let document = bson::to_document(&ImcDocument::from(row)).unwrap();
        assert_eq!(document.get("user_id"), Some(&Bson::Int32(999)));
    }

    #[test]
    fn test_null_user_id_keeps_field() {
        let mut row = sample_row();
        row.user_id = None;

        let document = bson::to_document(&ImcDocument::from(row)).unwrap();
        assert_eq!(document.get("user_id"), Some(&Bson::Null));
        assert_eq!(document.len(), 7);
    }
}
