//! CSV ingestion and train/test splitting tests.

mod tests {
    use reciprs::io::{read_csv, write_csv};
    use reciprs::{train_test_split, DataFrame, DataType, Result, Series, Value};
    use std::io::Write;

    #[test]
    fn csv_round_trip_preserves_values() -> Result<()> {
        let mut df = DataFrame::new();
        df.add_column("price", Series::from_numeric(&[100.5, 200.25, 300.0]))?;
        df.add_column("rooms", Series::from_i64(&[2, 3, 4]))?;
        df.add_column("kind", Series::from_strings(&["condo", "house", "condo"]))?;

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("frame.csv");
        write_csv(&df, &path)?;
        let read = read_csv(&path, true)?;

        assert_eq!(read, df);
        Ok(())
    }

    #[test]
    fn csv_type_inference_and_missing_cells() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("typed.csv");
        let mut file = std::fs::File::create(&path)?;
        writeln!(file, "count,ratio,flag,day,label")?;
        writeln!(file, "1,0.5,true,2024-01-01,aa")?;
        writeln!(file, ",1.5,false,2024-06-15,")?;
        writeln!(file, "3,NA,true,2024-12-31,cc")?;
        drop(file);

        let df = read_csv(&path, true)?;
        assert_eq!(df.column("count").unwrap().dtype(), DataType::Int64);
        assert_eq!(df.column("ratio").unwrap().dtype(), DataType::Float64);
        assert_eq!(df.column("flag").unwrap().dtype(), DataType::Bool);
        assert_eq!(df.column("day").unwrap().dtype(), DataType::Date);
        assert_eq!(df.column("label").unwrap().dtype(), DataType::Str);

        assert_eq!(df.get_value(1, "count"), Some(&Value::Na));
        assert_eq!(df.get_value(2, "ratio"), Some(&Value::Na));
        assert_eq!(df.get_value(1, "label"), Some(&Value::Na));
        assert_eq!(df.get_value(0, "flag"), Some(&Value::Bool(true)));
        Ok(())
    }

    #[test]
    fn csv_without_header_names_columns_positionally() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("headless.csv");
        let mut file = std::fs::File::create(&path)?;
        writeln!(file, "1,a")?;
        writeln!(file, "2,b")?;
        drop(file);

        let df = read_csv(&path, false)?;
        assert_eq!(df.column_names(), vec!["column_0", "column_1"]);
        assert_eq!(df.nrows(), 2);
        Ok(())
    }

    fn numbered_frame(n: usize) -> Result<DataFrame> {
        let mut df = DataFrame::new();
        let ids: Vec<i64> = (0..n as i64).collect();
        df.add_column("id", Series::from_i64(&ids))?;
        Ok(df)
    }

    #[test]
    fn split_partitions_all_rows() -> Result<()> {
        let df = numbered_frame(100)?;
        let (train, test) = train_test_split(&df, 0.2, Some(7))?;
        assert_eq!(train.nrows(), 80);
        assert_eq!(test.nrows(), 20);

        let mut seen: Vec<i64> = train
            .column("id")
            .unwrap()
            .iter()
            .chain(test.column("id").unwrap().iter())
            .filter_map(|v| match v {
                Value::Int64(i) => Some(*i),
                _ => None,
            })
            .collect();
        seen.sort();
        assert_eq!(seen, (0..100).collect::<Vec<i64>>());
        Ok(())
    }

    #[test]
    fn split_is_deterministic_under_a_seed() -> Result<()> {
        let df = numbered_frame(50)?;
        let (train_a, test_a) = train_test_split(&df, 0.3, Some(42))?;
        let (train_b, test_b) = train_test_split(&df, 0.3, Some(42))?;
        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);
        Ok(())
    }

    #[test]
    fn split_rejects_degenerate_inputs() -> Result<()> {
        let df = numbered_frame(10)?;
        assert!(train_test_split(&df, 0.0, Some(1)).is_err());
        assert!(train_test_split(&df, 1.0, Some(1)).is_err());
        assert!(train_test_split(&numbered_frame(1)?, 0.5, Some(1)).is_err());
        Ok(())
    }
}
