//! Frame and series surface tests.

mod tests {
    use reciprs::{DataFrame, DataType, Error, Result, Series, Value};

    fn sample_frame() -> Result<DataFrame> {
        let mut df = DataFrame::new();
        df.add_column("a", Series::from_numeric(&[1.0, 2.0, 3.0]))?;
        df.add_column("b", Series::from_i64(&[10, 20, 30]))?;
        df.add_column("c", Series::from_strings(&["x", "y", "z"]))?;
        Ok(df)
    }

    #[test]
    fn construction_and_shape() -> Result<()> {
        let df = sample_frame()?;
        assert_eq!(df.nrows(), 3);
        assert_eq!(df.ncols(), 3);
        assert_eq!(df.column_names(), vec!["a", "b", "c"]);
        assert_eq!(df.get_value(1, "b"), Some(&Value::Int64(20)));
        Ok(())
    }

    #[test]
    fn duplicate_column_is_rejected() -> Result<()> {
        let mut df = sample_frame()?;
        let result = df.add_column("a", Series::from_numeric(&[0.0, 0.0, 0.0]));
        assert!(matches!(result, Err(Error::DuplicateColumnName(_))));
        Ok(())
    }

    #[test]
    fn row_count_mismatch_is_rejected() -> Result<()> {
        let mut df = sample_frame()?;
        let result = df.add_column("d", Series::from_numeric(&[1.0]));
        assert!(matches!(
            result,
            Err(Error::InconsistentRowCount {
                expected: 3,
                found: 1
            })
        ));
        Ok(())
    }

    #[test]
    fn replace_keeps_column_position() -> Result<()> {
        let mut df = sample_frame()?;
        df.replace_column("b", Series::from_numeric(&[1.5, 2.5, 3.5]))?;
        assert_eq!(df.column_names(), vec!["a", "b", "c"]);
        assert_eq!(df.column("b").unwrap().dtype(), DataType::Float64);
        Ok(())
    }

    #[test]
    fn drop_removes_column() -> Result<()> {
        let mut df = sample_frame()?;
        let dropped = df.drop_column("b")?;
        assert_eq!(dropped.name(), Some("b"));
        assert_eq!(df.column_names(), vec!["a", "c"]);
        assert!(matches!(
            df.drop_column("b"),
            Err(Error::ColumnNotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn select_preserves_requested_order() -> Result<()> {
        let df = sample_frame()?;
        let selected = df.select(&["c".to_string(), "a".to_string()])?;
        assert_eq!(selected.column_names(), vec!["c", "a"]);
        assert_eq!(selected.nrows(), 3);
        Ok(())
    }

    #[test]
    fn take_rows_subsets_and_reorders() -> Result<()> {
        let df = sample_frame()?;
        let taken = df.take_rows(&[2, 0])?;
        assert_eq!(taken.nrows(), 2);
        assert_eq!(taken.get_value(0, "c"), Some(&Value::Str("z".into())));
        assert_eq!(taken.get_value(1, "a"), Some(&Value::Float64(1.0)));

        assert!(matches!(
            df.take_rows(&[5]),
            Err(Error::IndexOutOfBounds { index: 5, size: 3 })
        ));
        Ok(())
    }

    #[test]
    fn schema_reflects_names_and_types() -> Result<()> {
        let df = sample_frame()?;
        let schema = df.schema();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.field("a").unwrap().dtype, DataType::Float64);
        assert_eq!(schema.field("b").unwrap().dtype, DataType::Int64);
        assert_eq!(schema.field("c").unwrap().dtype, DataType::Str);
        assert!(!schema.contains("d"));
        Ok(())
    }

    #[test]
    fn from_columns_requires_names() {
        let unnamed = Series::from_numeric(&[1.0]);
        assert!(DataFrame::from_columns(vec![unnamed]).is_err());

        let named = Series::from_numeric(&[1.0]).with_name("a");
        let df = DataFrame::from_columns(vec![named]).unwrap();
        assert_eq!(df.column_names(), vec!["a"]);
    }
}
