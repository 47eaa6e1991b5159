#[cfg(test)]
pub(crate) mod tests {
    use crate::core::domain::RawValue;
    use crate::parsing::xlsx_parser::{parse_orders_xlsx, parse_orders_xlsx_bytes};
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Two-order workbook with Chinese headers: one row carries a
    /// date-formatted time and a numeric quantity, the other plain text.
    pub(crate) fn order_workbook() -> Vec<u8> {
        let mut workbook = Workbook::new();
        let time_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
        let sheet = workbook.add_worksheet();

        sheet.write_string(0, 0, " 打包操作人 ").unwrap();
        sheet.write_string(0, 1, "打包完成时间").unwrap();
        sheet.write_string(0, 2, "商品数量").unwrap();
        sheet.write_string(0, 3, "订单号").unwrap();

        let packed_at = ExcelDateTime::from_ymd(2024, 1, 1)
            .unwrap()
            .and_hms(9, 15, 0)
            .unwrap();
        sheet.write_string(1, 0, "张三").unwrap();
        sheet
            .write_datetime_with_format(1, 1, &packed_at, &time_format)
            .unwrap();
        sheet.write_number(1, 2, 2).unwrap();
        sheet.write_string(1, 3, "ORD1").unwrap();

        sheet.write_string(2, 0, "李四").unwrap();
        sheet.write_string(2, 1, "2024-01-01 10:05:00").unwrap();
        sheet.write_string(2, 2, "3").unwrap();

        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_parse_workbook_bytes() {
        let records = parse_orders_xlsx_bytes(&order_workbook()).unwrap();
        assert_eq!(records.len(), 2);

        // Header padding is trimmed.
        assert_eq!(records[0].get("打包操作人"), Some(&RawValue::from("张三")));
        assert_eq!(
            records[0].get("打包完成时间"),
            Some(&RawValue::from("2024-01-01 09:15:00"))
        );
        assert_eq!(records[0].get("商品数量"), Some(&RawValue::Number(2.0)));
        assert_eq!(records[1].get("商品数量"), Some(&RawValue::from("3")));
        // Empty cells are absent, not blank.
        assert!(records[1].get("订单号").is_none());
    }

    #[test]
    fn test_parse_workbook_file() {
        let mut temp_file = NamedTempFile::with_suffix(".xlsx").unwrap();
        temp_file.write_all(&order_workbook()).unwrap();
        temp_file.flush().unwrap();

        let records = parse_orders_xlsx(temp_file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("打包操作人"), Some(&RawValue::from("李四")));
    }

    #[test]
    fn test_blank_rows_and_headerless_columns_are_skipped() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Packed by").unwrap();
        sheet.write_string(1, 0, "Alice").unwrap();
        sheet.write_string(1, 1, "stray").unwrap();
        sheet.write_string(3, 0, "Bob").unwrap();
        let content = workbook.save_to_buffer().unwrap();

        let records = parse_orders_xlsx_bytes(&content).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[1].get("Packed by"), Some(&RawValue::from("Bob")));
    }

    #[test]
    fn test_header_only_sheet_has_no_records() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet().write_string(0, 0, "Qty").unwrap();
        let content = workbook.save_to_buffer().unwrap();

        assert!(parse_orders_xlsx_bytes(&content).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_workbook_content() {
        assert!(parse_orders_xlsx_bytes(b"PK not a workbook").is_err());
    }
}
