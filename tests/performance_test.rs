//! パフォーマンス・並行性テスト
//!
//! 大きなグリッドの処理時間の目安と、複数スレッドからの同時抽出を検証します。
//!
//! 正確な計測は`cargo bench`（criterion）を使用してください。

use rust_xlsxwriter::{Workbook, XlsxError};
use shiftgrid::{Extractor, ExtractorBuilder, Grid, SheetSelector};
use std::io::Cursor;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// 日数×従業員数のシフト表グリッド
fn synthetic_grid(days: usize, employees: usize) -> Grid {
    let mut rows = vec![
        vec!["MES".to_string(), "AGOSTO".to_string()],
        vec!["PLANTILLA".to_string()],
        std::iter::once(String::new())
            .chain((1..=days).map(|d| d.to_string()))
            .collect(),
    ];
    for employee in 0..employees {
        rows.push(
            std::iter::once(format!("Nombre{} Apellido{}", employee, employee))
                .chain((0..days).map(|d| ["M", "T", "N", "L"][(employee + d) % 4].to_string()))
                .collect(),
        );
    }
    Grid::from_rows(rows)
}

/// シートごとに月名の異なるワークブック
fn multi_month_workbook(months: &[&str]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    for month in months {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*month)?;
        worksheet.write_string(0, 0, "MES")?;
        worksheet.write_string(0, 1, *month)?;
        worksheet.write_string(1, 0, "PLANTILLA")?;
        for day in 1..=28u16 {
            worksheet.write_number(2, day, day as f64)?;
        }
        for employee in 0..50u32 {
            worksheet.write_string(3 + employee, 0, format!("Empleado{}", employee))?;
            for day in 1..=28u16 {
                worksheet.write_string(3 + employee, day, "M")?;
            }
        }
    }
    Ok(workbook.save_to_buffer()?)
}

/// 大きなグリッド（31日 × 5,000行）の抽出
#[test]
fn test_large_grid_extraction() {
    let grid = synthetic_grid(31, 5_000);
    let extractor = Extractor::default();

    let start = Instant::now();
    let result = extractor.extract(&grid);
    let elapsed = start.elapsed();

    assert_eq!(result.shifts.len(), 10_000);
    assert!(result.shifts.iter().all(|r| r.shifts.len() == 31));
    // デバッグビルドでも十分な余裕がある目安
    assert!(
        elapsed < Duration::from_secs(10),
        "extraction took {:?}",
        elapsed
    );
}

/// 複数スレッドからの同時抽出が互いに干渉しない
#[test]
fn test_concurrent_extractions_are_independent() {
    let extractor = Arc::new(Extractor::default());

    let handles: Vec<_> = (1..=8)
        .map(|employees| {
            let extractor = Arc::clone(&extractor);
            thread::spawn(move || {
                let grid = synthetic_grid(7, employees * 10);
                let result = extractor.extract(&grid);
                (employees, result)
            })
        })
        .collect();

    for handle in handles {
        let (employees, result) = handle.join().unwrap();
        assert_eq!(result.shifts.len(), employees * 20);
        assert_eq!(result.day_numbers.len(), 7);
    }
}

/// 並列のシート抽出は1シートずつの抽出と同じ結果になる
#[test]
fn test_parallel_sheets_match_sequential() {
    let months = ["Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio"];
    let data = multi_month_workbook(&months).unwrap();

    let parallel = ExtractorBuilder::new()
        .with_sheet_selector(SheetSelector::All)
        .build()
        .unwrap()
        .extract_sheets(Cursor::new(data.clone()))
        .unwrap();

    assert_eq!(parallel.len(), months.len());
    for (idx, (name, result)) in parallel.iter().enumerate() {
        assert_eq!(name, months[idx]);

        let sequential = ExtractorBuilder::new()
            .with_sheet_selector(SheetSelector::Index(idx))
            .build()
            .unwrap()
            .extract_from_reader(Cursor::new(data.clone()))
            .unwrap();
        assert_eq!(result, &sequential);
        assert_eq!(result.month, months[idx]);
    }
}
