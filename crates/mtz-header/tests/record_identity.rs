//! Decoding an encoded record gives back the same record.

use mtz_header::{
    ColumnCounts, ColumnGroup, ColumnRecord, ColumnSource, ColumnType, DatasetCell, DatasetName,
    HeaderRecord, SymmetryInfo, decode_record,
};
use proptest::prelude::*;

fn finite_f32() -> impl Strategy<Value = f32> {
    any::<f32>().prop_filter("finite", |v| v.is_finite())
}

fn label() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_()+-]{1,30}"
}

fn name() -> impl Strategy<Value = String> {
    "[ -~]{0,30}"
}

fn column_type() -> impl Strategy<Value = ColumnType> {
    prop::sample::select(ColumnType::ALL.to_vec())
}

fn assert_identity(record: &HeaderRecord) -> Result<(), TestCaseError> {
    let encoded = record.encode().map_err(|e| TestCaseError::fail(e.to_string()))?;
    let decoded = decode_record(&encoded).map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert_eq!(&decoded, record);
    Ok(())
}

proptest! {
    #[test]
    fn test_ncol_identity(columns in 0i32..100_000, reflections in 0i32..i32::MAX, batches in 0i32..100_000) {
        assert_identity(&HeaderRecord::Ncol(ColumnCounts { columns, reflections, batches }))?;
    }

    #[test]
    fn test_cell_identity(cell in prop::array::uniform6(1.0f32..1000.0)) {
        assert_identity(&HeaderRecord::Cell(cell))?;
        assert_identity(&HeaderRecord::Dcell(DatasetCell { id: 3, cell }))?;
    }

    #[test]
    fn test_column_identity(
        label in label(),
        column_type in column_type(),
        min in finite_f32(),
        max in finite_f32(),
        dataset_id in 0i32..1000,
    ) {
        assert_identity(&HeaderRecord::Column(ColumnRecord { label, column_type, min, max, dataset_id }))?;
    }

    #[test]
    fn test_dataset_name_identity(id in 0i32..100_000, name in name()) {
        assert_identity(&HeaderRecord::Project(DatasetName { id, name: name.clone() }))?;
        assert_identity(&HeaderRecord::Crystal(DatasetName { id, name: name.clone() }))?;
        assert_identity(&HeaderRecord::Dataset(DatasetName { id, name }))?;
    }

    #[test]
    fn test_syminf_identity(
        operator_count in 1i32..=192,
        primitive_operator_count in 1i32..=96,
        lattice_type in "[PABCFIR]",
        space_group_number in 1i32..=230,
        space_group_name in "[A-Z0-9 /-]{1,10}",
        point_group in "PG[0-9/mb]{1,6}",
        extra in prop::option::of("[A-Za-z]{1,8}"),
    ) {
        assert_identity(&HeaderRecord::Syminf(SymmetryInfo {
            operator_count,
            primitive_operator_count,
            lattice_type,
            space_group_number,
            space_group_name,
            point_group,
            extra,
        }))?;
    }

    #[test]
    fn test_colsrc_identity(
        label in label(),
        source in "[A-Za-z0-9_/:.]{1,36}",
        dataset_id in prop::option::of(0i32..10_000),
    ) {
        assert_identity(&HeaderRecord::Colsrc(ColumnSource { label, source, dataset_id }))?;
    }

    #[test]
    fn test_colgrp_identity(
        label in label(),
        group_name in label(),
        group_type in "[A-Z]{1,4}",
        position in 0u32..256,
        dataset_id in 0i32..1000,
    ) {
        assert_identity(&HeaderRecord::Colgrp(ColumnGroup { label, group_name, group_type, position, dataset_id }))?;
    }

    #[test]
    fn test_batch_list_identity(serials in prop::collection::vec(0i32..100_000, 0..10)) {
        assert_identity(&HeaderRecord::Batch(serials))?;
    }

    #[test]
    fn test_axis_names_identity(names in prop::collection::vec("[A-Z0-9]{1,9}", 0..=3)) {
        assert_identity(&HeaderRecord::Bhch(names))?;
    }

    #[test]
    fn test_title_identity(title in "[A-Za-z0-9]([A-Za-z0-9 ,.]{0,60}[A-Za-z0-9])?") {
        assert_identity(&HeaderRecord::Title(title))?;
    }
}

#[test]
fn test_reencode_ignores_spacing() {
    let lines = [
        "NCOL        5     12000        2",
        "CELL    79.1000    79.1000    38.0000    90.0000    90.0000    90.0000",
        "SORT    1   2   3   0   0",
        "SYMINF   8  8 P     96                 'P 43 21 2'  PG422",
        "COLUMN H          H     0.0000    30.0000    0",
        "DATASET       1 native",
        "BATCH     1     2     3",
    ];
    for line in lines {
        let mut raw = [b' '; 80];
        raw[..line.len()].copy_from_slice(line.as_bytes());
        let record = decode_record(&raw).unwrap();
        let reencoded = record.encode().unwrap();
        assert_eq!(decode_record(&reencoded).unwrap(), record, "{line}");
    }
}
