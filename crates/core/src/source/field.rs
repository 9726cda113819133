use crate::config;
use crate::context::EvalContext;
use crate::error::Result;
use crate::index::{DocId, FloatColumn, SegmentContext};
use crate::source::{string_hash, ValueSource};
use crate::values::{FloatDocValues, FunctionValues};
use std::any::Any;
use std::sync::Arc;

/// Reads a float column from each segment.
///
/// Segments without the column behave as if every document lacks a value:
/// `float_val` is `0.0` and `exists` is false.
#[derive(Debug, Clone)]
pub struct FloatFieldSource {
    field: String,
}

impl FloatFieldSource {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

#[derive(Debug)]
struct FloatFieldValues {
    field: String,
    column: Option<Arc<FloatColumn>>,
    max_doc: DocId,
}

impl FloatFieldValues {
    #[inline]
    fn check_doc(&self, doc: DocId) {
        assert!(
            doc < self.max_doc,
            "doc {doc} out of range for segment with max_doc={}",
            self.max_doc
        );
    }
}

impl FloatDocValues for FloatFieldValues {
    fn float_val(&self, doc: DocId) -> f32 {
        match &self.column {
            Some(col) => col.get(doc),
            None => {
                self.check_doc(doc);
                0.0
            }
        }
    }

    fn exists(&self, doc: DocId) -> bool {
        match &self.column {
            Some(col) => col.has_value(doc),
            None => {
                self.check_doc(doc);
                false
            }
        }
    }

    fn description(&self) -> String {
        format!("float({})", self.field)
    }
}

impl ValueSource for FloatFieldSource {
    fn get_values(&self, _context: &EvalContext, segment: &SegmentContext) -> Result<Box<dyn FunctionValues>> {
        let column = segment.reader.float_field(&self.field);
        if column.is_none() {
            tracing::trace!(field = %self.field, segment = segment.ord, "Field absent from segment");
        }
        Ok(Box::new(FloatFieldValues {
            field: self.field.clone(),
            column,
            max_doc: segment.max_doc(),
        }))
    }

    fn description(&self) -> String {
        format!("float({})", self.field)
    }

    fn source_eq(&self, other: &dyn ValueSource) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|o| self.field == o.field)
    }

    fn source_hash(&self) -> i32 {
        config::FIELD_SOURCE_HASH_SEED ^ string_hash(&self.field)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SegmentReader;
    use crate::mutable::ValueObject;

    fn segment(reader: SegmentReader) -> SegmentContext {
        SegmentContext {
            ord: 0,
            doc_base: 0,
            reader: Arc::new(reader),
        }
    }

    #[test]
    fn test_reads_column_values_and_existence() {
        let reader = SegmentReader::new(3)
            .with_float_field("age", FloatColumn::from_options(vec![Some(2.0), None, Some(0.0)]))
            .unwrap();
        let vals = FloatFieldSource::new("age")
            .get_values(&EvalContext::new(), &segment(reader))
            .unwrap();
        assert_eq!(vals.float_val(0), 2.0);
        assert_eq!(vals.float_val(1), 0.0);
        assert!(!vals.exists(1));
        assert_eq!(vals.object_val(1), None);
        assert_eq!(vals.object_val(2), Some(ValueObject::Float(0.0)));
        assert_eq!(vals.describe(0), "float(age)=2");
    }

    #[test]
    fn test_missing_column_reads_as_absent() {
        let vals = FloatFieldSource::new("age")
            .get_values(&EvalContext::new(), &segment(SegmentReader::new(2)))
            .unwrap();
        assert_eq!(vals.float_val(1), 0.0);
        assert!(!vals.exists(0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_missing_column_still_checks_doc() {
        let vals = FloatFieldSource::new("age")
            .get_values(&EvalContext::new(), &segment(SegmentReader::new(2)))
            .unwrap();
        vals.float_val(2);
    }

    #[test]
    fn test_field_equality_and_hash() {
        let a = FloatFieldSource::new("age");
        assert!(a.source_eq(&FloatFieldSource::new("age")));
        assert!(!a.source_eq(&FloatFieldSource::new("price")));
        assert_eq!(a.source_hash(), FloatFieldSource::new("age").source_hash());
        assert_eq!(a.description(), "float(age)");
    }
}
