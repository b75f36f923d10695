//! Unit tests for the npz_vis components
//!
//! Arrays are built in memory so that every rank and size class can be
//! exercised without touching the filesystem.

use approx::assert_relative_eq;
use ndarray::{Array1, Array2, ArrayD, IxDyn};
use npz_vis::{
    advise, describe,
    dimensions::AxisSelector,
    errors::NpzVisError,
    metadata::PreviewStyle,
    parallel::{get_parallel_info, ParallelConfig},
    plan_with_rng,
    render::{
        PlotKind, RenderPayload, HEATMAP_ELEMENT_CAP, HEATMAP_MAX_SIDE, HISTOGRAM_BINS,
        HISTOGRAM_SAMPLE_CAP, SCATTER_SAMPLE_CAP,
    },
    sampling::{evenly_spaced, sample_indices, square_side},
    sink::{RenderSink, TextSink},
    statistics::{histogram, Scalar, StatOperation},
    table::{total_pages, TablePager, ROWS_PER_PAGE},
    write_csv, Archive, ArrayData, ElementKind, Layout, NamedArray,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn float_array(name: &str, shape: &[usize]) -> NamedArray {
    let len: usize = shape.iter().product();
    let data = ArrayD::from_shape_vec(IxDyn(shape), (0..len).map(|i| i as f64).collect())
        .expect("shape matches element count");
    NamedArray::new(name, ArrayData::Float64(data))
}

fn int_range(name: &str, n: i64) -> NamedArray {
    NamedArray::new(name, ArrayData::Int(Array1::from_iter(0..n).into_dyn()))
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn plan(array: &NamedArray, kind: PlotKind) -> npz_vis::RenderPlan {
    let advice = advise(array);
    plan_with_rng(array, kind, &advice.default_x, &advice.default_y, &mut rng())
}

#[test]
fn test_error_display() {
    let err = NpzVisError::ArrayNotFound {
        name: "temp".to_string(),
    };
    assert_eq!(err.to_string(), "Array 'temp' not found in archive");

    let err = NpzVisError::Load {
        path: "data.npz".to_string(),
        message: "invalid Zip archive".to_string(),
    };
    assert!(err.to_string().contains("Error loading 'data.npz'"));
    assert_eq!(NpzVisError::NoSelection.to_string(), "No array selected");
}

#[test]
fn test_parallel_config() {
    let default_config = ParallelConfig::default();
    assert!(default_config.num_threads.is_none());

    let config_4 = ParallelConfig::with_threads(4);
    assert_eq!(config_4.num_threads, Some(4));
    assert!(default_config.current_threads() > 0);

    let info = get_parallel_info();
    assert!(info.current_threads > 0);
    assert!(info.available_cores > 0);
    assert!(info.to_string().contains("CPU cores"));
}

#[test]
fn test_layout_from_rank() {
    assert_eq!(Layout::of(&[]), Layout::Flattened { len: 1 });
    assert_eq!(Layout::of(&[7]), Layout::Vector { len: 7 });
    assert_eq!(Layout::of(&[3, 4]), Layout::Matrix { rows: 3, cols: 4 });
    assert_eq!(Layout::of(&[2, 3, 4]), Layout::Flattened { len: 24 });
    assert_eq!(Layout::of(&[0, 5]).logical_rows(), 0);
}

#[test]
fn test_element_kinds_and_dtypes() {
    let ints = int_range("a", 3);
    assert_eq!(ints.element_kind(), ElementKind::Integer);
    assert_eq!(ints.dtype(), "int64");

    let small = NamedArray::new("b", ArrayData::UInt(Array1::from(vec![1u64, 2]).into_dyn()))
        .with_dtype("uint8");
    assert_eq!(small.element_kind(), ElementKind::Integer);
    assert_eq!(small.dtype(), "uint8");

    let flags = NamedArray::new(
        "c",
        ArrayData::Bool(Array1::from(vec![true, false]).into_dyn()),
    );
    assert_eq!(flags.element_kind(), ElementKind::Other);
    assert_eq!(flags.data().flat_texts(0, 2), vec!["true", "false"]);
}

#[test]
fn test_statistics_omission() {
    let empty = float_array("empty", &[0]);
    let stats = describe(&empty).stats;
    assert_eq!(stats.count, 0);
    assert!(stats.min.is_none() && stats.max.is_none());
    assert!(stats.mean.is_none() && stats.std_dev.is_none());

    let single = NamedArray::new(
        "one",
        ArrayData::Float64(Array1::from(vec![4.5]).into_dyn()),
    );
    let stats = describe(&single).stats;
    assert_eq!(stats.min, Some(Scalar::Float64(4.5)));
    assert_eq!(stats.max, Some(Scalar::Float64(4.5)));
    assert!(stats.mean.is_none());
    assert!(stats.std_dev.is_none());
}

#[test]
fn test_statistics_values() {
    let values = NamedArray::new(
        "v",
        ArrayData::Float64(Array1::from(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).into_dyn()),
    );
    let stats = describe(&values).stats;
    assert_eq!(stats.get(StatOperation::Min), Some(Scalar::Float64(2.0)));
    assert_eq!(stats.get(StatOperation::Max), Some(Scalar::Float64(9.0)));
    assert_relative_eq!(stats.mean.unwrap(), 5.0);
    // population standard deviation
    assert_relative_eq!(stats.std_dev.unwrap(), 2.0);

    let with_nan = NamedArray::new(
        "nan",
        ArrayData::Float64(Array1::from(vec![1.0, f64::NAN, 3.0]).into_dyn()),
    );
    let stats = describe(&with_nan).stats;
    assert!(stats.min.unwrap().as_f64().is_nan());
    assert!(stats.mean.unwrap().is_nan());
}

#[test]
fn test_integer_extremes_are_exact() {
    let big: i64 = (1 << 53) + 1;
    let single = NamedArray::new("big", ArrayData::Int(Array1::from(vec![big]).into_dyn()));
    let description = describe(&single);
    assert_eq!(description.stats.min, Some(Scalar::Int(big)));
    assert_eq!(description.stats.max, Some(Scalar::Int(big)));
    assert!(description.to_string().contains("Min: 9007199254740993"));
    assert_eq!(
        TablePager::new(&single).page(1).rows[0].values,
        vec!["9007199254740993"]
    );

    let unsigned = NamedArray::new(
        "u",
        ArrayData::UInt(Array1::from(vec![u64::MAX, 3, u64::MAX - 1]).into_dyn()),
    );
    let stats = describe(&unsigned).stats;
    assert_eq!(stats.min, Some(Scalar::UInt(3)));
    assert_eq!(stats.max, Some(Scalar::UInt(u64::MAX)));
    assert!(stats.mean.is_some());

    let flags = NamedArray::new(
        "flags",
        ArrayData::Bool(Array1::from(vec![true, false, true]).into_dyn()),
    );
    let stats = describe(&flags).stats;
    assert_eq!(stats.min, Some(Scalar::Bool(false)));
    assert_eq!(stats.max, Some(Scalar::Bool(true)));
}

#[test]
fn test_preview_by_rank() {
    let vector = int_range("seq", 100);
    let preview = describe(&vector).preview;
    assert_eq!(preview.style, PreviewStyle::Indexed);
    assert_eq!(preview.rows.len(), 10);
    assert_eq!(preview.rows[9].cells, vec!["9"]);
    assert!(preview.truncated);

    let wide = float_array("wide", &[3, 30]);
    let preview = describe(&wide).preview;
    assert_eq!(preview.style, PreviewStyle::Matrix);
    assert_eq!(preview.rows.len(), 3);
    assert_eq!(preview.columns, 10);
    assert_eq!(preview.rows[1].cells[0], "30.000");
    assert!(preview.truncated);

    let small = float_array("small", &[2, 2]);
    assert!(!describe(&small).preview.truncated);

    let cube = float_array("cube", &[2, 3, 4]);
    let preview = describe(&cube).preview;
    assert_eq!(preview.style, PreviewStyle::Flattened);
    assert_eq!(preview.rows.len(), 10);
    assert_eq!(preview.rows[5].index, 5);
    assert!(preview.truncated);
}

#[test]
fn test_description_text() {
    let text = describe(&int_range("seq", 5)).to_string();
    assert!(text.contains("Array: seq"));
    assert!(text.contains("Shape: (5,)"));
    assert!(text.contains("Type: int64"));
    assert!(text.contains("Min: 0"));
    assert!(text.contains("Std Dev:"));
    assert!(!text.contains("truncated"));
}

#[test]
fn test_axis_selector_parse() {
    assert_eq!(AxisSelector::parse("index"), AxisSelector::Index);
    assert_eq!(AxisSelector::parse(" Value "), AxisSelector::Value);
    assert_eq!(AxisSelector::parse("3"), AxisSelector::Column(3));
    assert_eq!(
        AxisSelector::parse("-1"),
        AxisSelector::Text("-1".to_string())
    );
    assert_eq!(AxisSelector::Column(12).to_string(), "12");
}

#[test]
fn test_dimension_advice() {
    let advice = advise(&int_range("seq", 10));
    assert_eq!(advice.x_options, vec![AxisSelector::Index, AxisSelector::Value]);
    assert_eq!(advice.default_x, AxisSelector::Index);
    assert_eq!(advice.default_y, AxisSelector::Value);

    let narrow = advise(&float_array("m", &[4, 5]));
    assert_eq!(narrow.x_options.len(), 5);
    assert_eq!(narrow.default_x, AxisSelector::Column(0));
    assert_eq!(narrow.default_y, AxisSelector::Column(1));

    let single = advise(&float_array("m", &[4, 1]));
    assert_eq!(single.x_options, vec![AxisSelector::Column(0)]);
    assert_eq!(single.default_x, single.default_y);

    let wide = advise(&float_array("w", &[2, 25]));
    assert!(wide.x_options.is_empty() && wide.y_options.is_empty());
    assert_eq!(wide.default_x, AxisSelector::Column(0));
    assert_eq!(wide.default_y, AxisSelector::Column(1));

    let cube = advise(&float_array("c", &[2, 2, 2]));
    assert_eq!(cube.x_options, vec![AxisSelector::Flattened]);
    assert_eq!(cube.default_x, AxisSelector::Flattened);
}

#[test]
fn test_defaults_distinct_when_two_options() {
    for shape in [vec![8], vec![3, 2], vec![3, 20], vec![3, 21]] {
        let advice = advise(&float_array("a", &shape));
        let options = advice.x_options.len();
        if options >= 2 || options == 0 {
            assert_ne!(advice.default_x, advice.default_y, "shape {shape:?}");
        }
    }
}

#[test]
fn test_sampling_helpers() {
    let mut rng = rng();
    let picked = sample_indices(&mut rng, 1000, 100);
    assert_eq!(picked.len(), 100);
    assert_eq!(picked.iter().collect::<HashSet<_>>().len(), 100);
    assert!(picked.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(sample_indices(&mut rng, 5, 10).len(), 5);

    assert_eq!(evenly_spaced(5, 3), vec![0, 2, 4]);
    assert_eq!(evenly_spaced(10, 1), vec![0]);
    assert_eq!(evenly_spaced(3, 10), vec![0, 1, 2]);
    let spaced = evenly_spaced(1500, 1000);
    assert_eq!(spaced.len(), 1000);
    assert_eq!((spaced[0], spaced[999]), (0, 1499));

    assert_eq!(square_side(0), 0);
    assert_eq!(square_side(24), 4);
    assert_eq!(square_side(1_000_000), 1000);
}

#[test]
fn test_histogram_counts() {
    let hist = histogram(&[0.0, 1.0, 2.0, 3.0, f64::NAN], 3);
    assert_eq!(hist.edges.len(), 4);
    assert_eq!(hist.counts, vec![1, 1, 2]);
    assert_eq!(hist.total(), 4);

    let constant = histogram(&[2.0, 2.0], 4);
    assert_eq!(constant.total(), 2);
    assert_relative_eq!(constant.edges[0], 1.5);
}

#[test]
fn test_histogram_plan_unsampled() {
    let plan = plan(&int_range("seq", 100), PlotKind::Histogram);
    assert_eq!(plan.title, "seq Histogram");
    assert!(!plan.sampled);
    match plan.payload {
        RenderPayload::Histogram { values, bins } => {
            assert_eq!(values.len(), 100);
            assert_eq!(bins, HISTOGRAM_BINS);
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn test_histogram_plan_sampled() {
    let big = float_array("big", &[HISTOGRAM_SAMPLE_CAP + 10]);
    let plan = plan(&big, PlotKind::Histogram);
    assert!(plan.sampled);
    assert_eq!(plan.title, "big Histogram (Sampled)");
    assert_eq!(plan.payload.element_count(), HISTOGRAM_SAMPLE_CAP);
}

#[test]
fn test_line_plans() {
    let vector = plan(&int_range("seq", 20), PlotKind::Line);
    assert!(matches!(vector.payload, RenderPayload::Series { ref values, .. } if values.len() == 20));

    let tall = plan(&float_array("tall", &[100, 3]), PlotKind::Line);
    match &tall.payload {
        RenderPayload::MultiSeries(series) => {
            assert_eq!(series.len(), 3);
            assert_eq!(series[2].label, "Column 2");
            assert_eq!(series[2].values.len(), 100);
        }
        other => panic!("unexpected payload {other:?}"),
    }

    let square = plan(&float_array("sq", &[4, 4]), PlotKind::Line);
    match &square.payload {
        RenderPayload::MultiSeries(series) => assert_eq!(series[0].label, "Row 0"),
        other => panic!("unexpected payload {other:?}"),
    }

    let big = plan(&float_array("big", &[20, 30]), PlotKind::Line);
    assert_eq!(big.title, "big Line Plot (Flattened)");
    assert_eq!(big.payload.element_count(), 600);

    let cube = plan(&float_array("cube", &[2, 3, 4]), PlotKind::Line);
    assert!(cube.title.ends_with("(Flattened)"));
}

#[test]
fn test_heatmap_plans() {
    let column = plan(&int_range("seq", 12), PlotKind::Heatmap);
    match &column.payload {
        RenderPayload::Image { matrix, colorbar } => {
            assert_eq!(matrix.dim(), (12, 1));
            assert!(!colorbar);
        }
        other => panic!("unexpected payload {other:?}"),
    }

    let tall = plan(&float_array("tall", &[1500, 3]), PlotKind::Heatmap);
    assert!(tall.sampled);
    assert_eq!(tall.title, "tall Heatmap (Sampled)");
    match &tall.payload {
        RenderPayload::Image { matrix, .. } => {
            assert_eq!(matrix.dim(), (HEATMAP_MAX_SIDE, 3));
            // first and last rows are kept
            assert_relative_eq!(matrix[[0, 0]], 0.0);
            assert_relative_eq!(matrix[[999, 2]], 1499.0 * 3.0 + 2.0);
        }
        other => panic!("unexpected payload {other:?}"),
    }

    let cube = plan(&float_array("cube", &[2, 3, 4]), PlotKind::Heatmap);
    assert_eq!(cube.title, "cube Heatmap (Reshaped)");
    match &cube.payload {
        RenderPayload::Image { matrix, .. } => {
            assert_eq!(matrix.dim(), (4, 4));
            assert_relative_eq!(matrix[[3, 3]], 15.0);
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn test_long_vector_heatmap_is_capped() {
    let long = float_array("long", &[HEATMAP_ELEMENT_CAP + 501]);
    let plan = plan(&long, PlotKind::Heatmap);
    assert!(plan.sampled);
    assert_eq!(plan.title, "long Heatmap (Sampled)");
    assert!(plan.payload.element_count() <= HEATMAP_ELEMENT_CAP);
    match &plan.payload {
        RenderPayload::Image { matrix, colorbar } => {
            assert_eq!(matrix.dim(), (HEATMAP_ELEMENT_CAP, 1));
            assert!(!colorbar);
            // first and last elements are kept
            assert_relative_eq!(matrix[[0, 0]], 0.0);
            assert_relative_eq!(
                matrix[[HEATMAP_ELEMENT_CAP - 1, 0]],
                (HEATMAP_ELEMENT_CAP + 500) as f64
            );
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn test_large_volume_heatmap_is_capped() {
    let volume = float_array("volume", &[11, 100, 1001]);
    let plan = plan(&volume, PlotKind::Heatmap);
    assert!(plan.sampled);
    assert_eq!(plan.title, "volume Heatmap (Reshaped)");
    assert!(plan.payload.element_count() <= HEATMAP_ELEMENT_CAP);
    match &plan.payload {
        RenderPayload::Image { matrix, .. } => {
            assert_eq!(matrix.dim(), (1000, 1000));
            assert_relative_eq!(matrix[[999, 999]], 999_999.0);
        }
        other => panic!("unexpected payload {other:?}"),
    }

    let small = self::plan(&float_array("small", &[10, 10, 10]), PlotKind::Heatmap);
    assert!(!small.sampled);
    assert_eq!(small.title, "small Heatmap (Reshaped)");
}

#[test]
fn test_empty_heatmap_is_diagnostic() {
    let empty = float_array("empty", &[0, 4]);
    let plan = plan(&empty, PlotKind::Heatmap);
    match plan.payload {
        RenderPayload::Diagnostic(message) => assert!(message.starts_with("Error plotting:")),
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn test_scatter_vector_axis_order() {
    let seq = NamedArray::new(
        "v",
        ArrayData::Float64(Array1::from(vec![10.0, 20.0, 30.0]).into_dyn()),
    );
    let plan = plan_with_rng(
        &seq,
        PlotKind::Scatter,
        &AxisSelector::Value,
        &AxisSelector::Index,
        &mut rng(),
    );
    match plan.payload {
        RenderPayload::Points { xs, ys, .. } => {
            assert_eq!(xs, vec![10.0, 20.0, 30.0]);
            assert_eq!(ys, vec![0.0, 1.0, 2.0]);
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn test_scatter_matrix_columns() {
    let matrix = float_array("m", &[1500, 3]);
    let plan = plan_with_rng(
        &matrix,
        PlotKind::Scatter,
        &AxisSelector::Column(0),
        &AxisSelector::Column(2),
        &mut rng(),
    );
    assert!(!plan.sampled);
    assert_eq!(plan.title, "m Scatter (Dim 0 vs 2)");
    match plan.payload {
        RenderPayload::Points {
            xs,
            ys,
            x_label,
            y_label,
        } => {
            assert_eq!(xs.len(), 1500);
            assert_relative_eq!(ys[1], 5.0);
            assert_eq!(x_label.as_deref(), Some("Dimension 0"));
            assert_eq!(y_label.as_deref(), Some("Dimension 2"));
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn test_scatter_out_of_range_falls_back() {
    let matrix = float_array("m", &[100, 5]);
    let plan = plan_with_rng(
        &matrix,
        PlotKind::Scatter,
        &AxisSelector::Column(7),
        &AxisSelector::Column(1),
        &mut rng(),
    );
    assert!(!plan.sampled);
    assert_eq!(plan.title, "m Scatter Plot (Flattened)");
    assert_eq!(
        plan.note.as_deref(),
        Some("Invalid indices: x=7, y=1 for shape (100, 5)")
    );
    assert_eq!(plan.payload.element_count(), 500);

    let text = plan_with_rng(
        &matrix,
        PlotKind::Scatter,
        &AxisSelector::parse("abc"),
        &AxisSelector::Column(1),
        &mut rng(),
    );
    assert!(text.note.unwrap().contains("must be integers"));
}

#[test]
fn test_payload_caps_hold() {
    let wide = float_array("wide", &[20, 60_000]);
    let heat = plan(&wide, PlotKind::Heatmap);
    assert!(heat.payload.element_count() <= HEATMAP_MAX_SIDE * HEATMAP_MAX_SIDE);

    let rows = float_array("rows", &[25_000, 2]);
    let scatter = plan(&rows, PlotKind::Scatter);
    assert!(scatter.sampled);
    assert_eq!(scatter.payload.element_count(), SCATTER_SAMPLE_CAP);

    let fallback = plan_with_rng(
        &rows,
        PlotKind::Scatter,
        &AxisSelector::Column(7),
        &AxisSelector::Column(1),
        &mut rng(),
    );
    assert!(fallback.sampled);
    assert!(fallback.note.is_some());
    assert_eq!(fallback.title, "rows Scatter Plot (Flattened, Sampled)");
    assert_eq!(fallback.payload.element_count(), SCATTER_SAMPLE_CAP);

    let cube = float_array("cube", &[20, 30, 40]);
    let scatter = plan(&cube, PlotKind::Scatter);
    assert!(scatter.sampled);
    assert_eq!(scatter.title, "cube Scatter Plot (Sampled)");
    assert_eq!(scatter.payload.element_count(), SCATTER_SAMPLE_CAP);
}

#[test]
fn test_plot_kind_parse() {
    assert_eq!("Heatmap".parse::<PlotKind>(), Ok(PlotKind::Heatmap));
    assert!("pie".parse::<PlotKind>().is_err());
    assert_eq!(PlotKind::default(), PlotKind::Histogram);
}

#[test]
fn test_total_pages() {
    assert_eq!(total_pages(0), 1);
    assert_eq!(total_pages(1), 1);
    assert_eq!(total_pages(50), 1);
    assert_eq!(total_pages(51), 2);
    assert_eq!(total_pages(100), 2);
}

#[test]
fn test_page_clamping_matches_clamped_request() {
    let array = int_range("seq", 123);
    let pager = TablePager::new(&array);
    assert_eq!(pager.total_pages(), 3);
    for requested in [-5_i64, 0, 1, 2, 3, 4, 1_000, i64::MAX, i64::MIN] {
        let clamped = requested.clamp(1, 3);
        assert_eq!(pager.page(requested), pager.page(clamped));
    }
    let last = pager.page(3);
    assert_eq!(last.rows.len(), 23);
    assert_eq!(last.rows[0].index, 2 * ROWS_PER_PAGE);
}

#[test]
fn test_resumed_pager_keeps_page_count() {
    let array = int_range("seq", 123);
    let pager = TablePager::resume(&array, 2);
    assert_eq!(pager.total_pages(), 2);
    let last = pager.page(i64::MAX);
    assert_eq!((last.page_number, last.total_pages), (2, 2));
    assert_eq!(last.rows[0].index, ROWS_PER_PAGE);
    assert_eq!(pager.step(2, 1), 2);

    assert_eq!(TablePager::resume(&array, 0).total_pages(), 1);
}

#[test]
fn test_page_step_stays_at_bounds() {
    let array = int_range("seq", 100);
    let pager = TablePager::new(&array);
    assert_eq!(pager.step(1, -1), 1);
    assert_eq!(pager.step(1, 1), 2);
    assert_eq!(pager.step(2, 1), 2);
}

#[test]
fn test_matrix_table_columns_capped() {
    let wide = float_array("wide", &[3, 25]);
    let page = TablePager::new(&wide).page(1);
    assert_eq!(page.columns.len(), 21);
    assert_eq!(page.columns[0], "Row");
    assert_eq!(page.columns[20], "Col 19");
    assert!(page.rows.iter().all(|row| row.values.len() == 20));
    assert_eq!(page.shape_info, "Shape: (3, 25) | Rows: 3, Columns: 25");
}

#[test]
fn test_scalar_table() {
    let scalar = NamedArray::new("s", ArrayData::Float64(ArrayD::from_elem(IxDyn(&[]), 2.5)));
    let page = TablePager::new(&scalar).page(1);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].values, vec!["2.5"]);
    assert_eq!(page.columns, vec!["Index", "Value"]);
}

#[test]
fn test_csv_matrix_keeps_all_columns() {
    let wide = NamedArray::new(
        "wide",
        ArrayData::Int(Array2::from_shape_fn((2, 25), |(r, c)| (r * 100 + c) as i64).into_dyn()),
    );
    let mut buffer = Vec::new();
    let rows = write_csv(&wide, &mut buffer).expect("in-memory write");
    assert_eq!(rows, 2);

    let text = String::from_utf8(buffer).expect("utf-8 csv");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Row,Col0,Col1,"));
    assert!(lines[0].ends_with(",Col24"));
    assert_eq!(lines[2].split(',').count(), 26);
    assert!(lines[2].ends_with(",124"));
}

#[test]
fn test_csv_flattened() {
    let cube = float_array("cube", &[2, 2, 2]);
    let mut buffer = Vec::new();
    assert_eq!(write_csv(&cube, &mut buffer).expect("in-memory write"), 8);
    let text = String::from_utf8(buffer).expect("utf-8 csv");
    assert!(text.starts_with("Index,Value\n0,0\n1,1\n"));
    assert!(text.ends_with("7,7\n"));
}

#[test]
fn test_archive_lookup() {
    let archive = Archive::from_arrays(vec![int_range("b", 3), int_range("a", 2)]);
    assert_eq!(archive.names().collect::<Vec<_>>(), vec!["b", "a"]);
    assert_eq!(archive.get("a").map(NamedArray::len).ok(), Some(2));
    assert!(matches!(
        archive.get("zzz"),
        Err(NpzVisError::ArrayNotFound { .. })
    ));
    assert!(archive.to_string().contains("Contains 2 arrays"));
}

#[test]
fn test_text_sink_output() {
    let plan = plan(&int_range("seq", 100), PlotKind::Histogram);
    let mut sink = TextSink::new(Vec::new());
    sink.draw(&plan).expect("writing to a Vec cannot fail");
    let text = String::from_utf8(sink.into_inner()).expect("utf-8 output");
    assert!(text.starts_with("seq Histogram\n"));
    assert!(text.contains("100 values in 100 bins"));
}
