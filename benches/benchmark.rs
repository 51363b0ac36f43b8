//! パフォーマンスベンチマーク
//!
//! このモジュールは、shiftgridクレートのパフォーマンスを測定するためのベンチマークを提供します。
//!
//! 実装するベンチマーク:
//! - グリッドからの抽出（1か月分、従業員数を変えて計測）
//! - ワークブックの読み込みを含む抽出
//! - 複数シートの並列抽出
//!
//! フィクスチャはすべてメモリ上で生成します。

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_xlsxwriter::{Workbook, XlsxError};
use shiftgrid::{Extractor, ExtractorBuilder, Grid, SheetSelector};
use std::io::Cursor;

const DAYS: usize = 31;

/// 1か月分のシフト表グリッドを生成
fn synthetic_grid(employees: usize) -> Grid {
    let mut rows = vec![
        vec!["MES".to_string(), "OCTUBRE".to_string()],
        vec!["PLANTILLA".to_string()],
        std::iter::once(String::new())
            .chain((1..=DAYS).map(|d| d.to_string()))
            .collect(),
        Vec::new(),
    ];
    for employee in 0..employees {
        rows.push(
            std::iter::once(format!("Empleado{}", employee))
                .chain((0..DAYS).map(|d| ["M", "T", "N", "L"][(employee + d) % 4].to_string()))
                .collect(),
        );
    }
    Grid::from_rows(rows)
}

/// 1か月分のシフト表をシート数分含むワークブックを生成
fn synthetic_workbook(sheets: usize, employees: u32) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    for sheet in 0..sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(format!("Mes{}", sheet + 1))?;
        worksheet.write_string(0, 0, "MES")?;
        worksheet.write_string(0, 1, format!("Mes{}", sheet + 1))?;
        worksheet.write_string(1, 0, "PLANTILLA")?;
        for day in 1..=DAYS as u16 {
            worksheet.write_number(2, day, day as f64)?;
        }
        for employee in 0..employees {
            let row = 4 + employee;
            worksheet.write_string(row, 0, format!("Empleado{}", employee))?;
            for day in 1..=DAYS as u16 {
                let shift = ["M", "T", "N", "L"][(employee as usize + day as usize) % 4];
                worksheet.write_string(row, day, shift)?;
            }
        }
    }
    Ok(workbook.save_to_buffer()?)
}

/// グリッドからの抽出（読み込みを含まない）
fn benchmark_extract_grid(c: &mut Criterion) {
    let extractor = Extractor::default();
    let mut group = c.benchmark_group("extract_grid");

    for employees in [50usize, 500, 5_000] {
        let grid = synthetic_grid(employees);
        group.throughput(Throughput::Elements(employees as u64));
        group.bench_with_input(BenchmarkId::from_parameter(employees), &grid, |b, grid| {
            b.iter(|| black_box(extractor.extract(black_box(grid))));
        });
    }

    group.finish();
}

/// ワークブックの読み込みを含む抽出
fn benchmark_extract_workbook(c: &mut Criterion) {
    let data = match synthetic_workbook(1, 200) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Warning: Failed to generate workbook: {}. Skipping benchmark.", e);
            return;
        }
    };

    let extractor = ExtractorBuilder::new().build().unwrap();

    let mut group = c.benchmark_group("extract_workbook");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.sample_size(20);

    group.bench_function("single_sheet_200_employees", |b| {
        b.iter(|| {
            let input = Cursor::new(black_box(&data));
            black_box(extractor.extract_from_reader(input).unwrap())
        });
    });

    group.finish();
}

/// 12シート（1年分）の並列抽出
fn benchmark_extract_sheets(c: &mut Criterion) {
    let data = match synthetic_workbook(12, 100) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Warning: Failed to generate workbook: {}. Skipping benchmark.", e);
            return;
        }
    };

    let extractor = ExtractorBuilder::new()
        .with_sheet_selector(SheetSelector::All)
        .build()
        .unwrap();

    let mut group = c.benchmark_group("extract_sheets");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.sample_size(10);

    group.bench_function("twelve_months", |b| {
        b.iter(|| {
            let input = Cursor::new(black_box(&data));
            black_box(extractor.extract_sheets(input).unwrap())
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_extract_grid,
    benchmark_extract_workbook,
    benchmark_extract_sheets
);
criterion_main!(benches);
