//! Instance presenter — the input contract from the data-loading side.
//!
//! The body never loads data itself; a presenter hands it fixed-length
//! numeric vectors plus the schema describing them. `VecPresenter` is the
//! bundled in-memory implementation.

use thymos_core::error::{Result, SchemaError, ThymosError};
use thymos_core::schema::DataSchema;

/// A sequence of fixed-length feature vectors with their schema.
pub trait InstancePresenter {
    fn schema(&self) -> &DataSchema;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row `index`, with one value per schema attribute.
    fn instance(&self, index: usize) -> &[f64];
}

/// In-memory presenter over owned rows.
#[derive(Debug, Clone)]
pub struct VecPresenter {
    schema: DataSchema,
    rows: Vec<Vec<f64>>,
}

impl VecPresenter {
    /// Wrap rows after checking every row against the schema width.
    pub fn new(schema: DataSchema, rows: Vec<Vec<f64>>) -> Result<Self> {
        let width = schema.width();
        for row in &rows {
            if row.len() != width {
                return Err(ThymosError::Schema(SchemaError::WidthMismatch {
                    expected: width,
                    found: row.len(),
                }));
            }
        }
        Ok(Self { schema, rows })
    }
}

impl InstancePresenter for VecPresenter {
    fn schema(&self) -> &DataSchema {
        &self.schema
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn instance(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thymos_core::schema::Attribute;

    #[test]
    fn rows_must_match_schema_width() {
        let schema = DataSchema::new(vec![
            Attribute::categorical("a", 2),
            Attribute::categorical("b", 2),
        ]);
        assert!(VecPresenter::new(schema.clone(), vec![vec![0.0, 1.0]]).is_ok());
        assert!(VecPresenter::new(schema, vec![vec![0.0]]).is_err());
    }

    #[test]
    fn presenter_exposes_rows_in_order() {
        let schema = DataSchema::new(vec![Attribute::categorical("a", 2)]);
        let p = VecPresenter::new(schema, vec![vec![0.0], vec![1.0]]).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.instance(1), &[1.0]);
    }
}
