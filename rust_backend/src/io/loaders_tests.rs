#[cfg(test)]
mod tests {
    use crate::io::loaders::{OrderLoadResult, OrderLoader, SourceFormat};
    use crate::parsing::xlsx_parser_tests::tests::order_workbook;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CSV_CONTENT: &str = "打包操作人,打包完成时间,商品数量\n张三,2024-01-01 09:15:00,2\n张三,2024-01-01 09:45:00,3\n";

    fn create_temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::with_suffix(suffix).unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_load_from_file_csv() {
        let temp_file = create_temp_file(".csv", CSV_CONTENT);
        let result = OrderLoader::load_from_file(temp_file.path()).unwrap();

        assert_eq!(result.source_format, SourceFormat::Csv);
        assert_eq!(result.num_records, 2);
    }

    #[test]
    fn test_load_from_file_json_uppercase_extension() {
        let temp_file = create_temp_file(".JSON", r#"[{"Packed by": "Alice", "Qty": 1}]"#);
        let result = OrderLoader::load_from_file(temp_file.path()).unwrap();

        assert_eq!(result.source_format, SourceFormat::Json);
        assert_eq!(result.records.len(), 1);
    }

    #[test]
    fn test_load_unsupported_extension() {
        let temp_file = create_temp_file(".txt", "hello");
        let err = OrderLoader::load_from_file(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported file format"));
    }

    #[test]
    fn test_load_from_file_xlsx() {
        let mut temp_file = NamedTempFile::with_suffix(".xlsx").unwrap();
        temp_file.write_all(&order_workbook()).unwrap();
        temp_file.flush().unwrap();

        let result = OrderLoader::load_from_file(temp_file.path()).unwrap();
        assert_eq!(result.source_format, SourceFormat::Xlsx);
        assert_eq!(result.num_records, 2);
    }

    #[test]
    fn test_load_corrupt_workbook() {
        let temp_file = create_temp_file(".xlsx", "PK");
        let err = OrderLoader::load_from_file(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse workbook"));
    }

    #[test]
    fn test_load_from_bytes() {
        let result = OrderLoader::load_from_bytes("upload.csv", CSV_CONTENT.as_bytes()).unwrap();
        assert_eq!(result.num_records, 2);

        assert!(OrderLoader::load_from_bytes("upload.json", b"not json").is_err());

        let result = OrderLoader::load_from_bytes("upload.XLSX", &order_workbook()).unwrap();
        assert_eq!(result.source_format, SourceFormat::Xlsx);
        assert_eq!(result.records.len(), 2);
        assert!(OrderLoader::load_from_bytes("upload", b"[]").is_err());
    }

    #[test]
    fn test_source_format_detection() {
        assert_eq!(SourceFormat::from_file_name("a.CSV"), Some(SourceFormat::Csv));
        assert_eq!(SourceFormat::from_file_name("dir/a.json"), Some(SourceFormat::Json));
        assert_eq!(SourceFormat::from_file_name("a.xlsx"), Some(SourceFormat::Xlsx));
        assert_eq!(SourceFormat::from_file_name("a.xls"), Some(SourceFormat::Xlsx));
        assert_eq!(SourceFormat::from_file_name("a.txt"), None);
        assert_eq!(SourceFormat::from_file_name("noext"), None);
    }

    #[test]
    fn test_load_result_counts_records() {
        let result = OrderLoadResult::new(Vec::new(), SourceFormat::Json);
        assert_eq!(result.num_records, 0);
    }
}
