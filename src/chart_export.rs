//! Chart export to PNG (plotters bitmap) and EPS (minimal PostScript, no deps).

use color_eyre::Result;
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::categories::Rgb;
use crate::charts::{text_color_on, BarFigure, Figure, HeatmapFigure};

/// Export format for chart: PNG or EPS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartExportFormat {
    Png,
    Eps,
}

impl ChartExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Eps => "eps",
        }
    }

    /// `.eps` selects EPS; any other extension gets PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("eps") => Self::Eps,
            _ => Self::Png,
        }
    }
}

/// Pixel sizes for PNG output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub bar_size: (u32, u32),
    pub heatmap_size: (u32, u32),
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            bar_size: (1500, 750),
            heatmap_size: (1200, 750),
        }
    }
}

/// Persist `figure` at `path`, creating missing parent directories and overwriting an existing
/// file. `None` does nothing. Returns the written path.
pub fn save_figure(
    figure: &Figure,
    path: Option<&Path>,
    options: &ExportOptions,
) -> Result<Option<PathBuf>> {
    let Some(path) = path else {
        return Ok(None);
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    match (ChartExportFormat::from_path(path), figure) {
        (ChartExportFormat::Eps, Figure::Bar(f)) => write_bar_eps(path, f)?,
        (ChartExportFormat::Eps, Figure::Heatmap(f)) => write_heatmap_eps(path, f)?,
        (ChartExportFormat::Png, Figure::Bar(f)) => write_bar_png(path, f, options.bar_size)?,
        (ChartExportFormat::Png, Figure::Heatmap(f)) => {
            write_heatmap_png(path, f, options.heatmap_size)?
        }
    }
    info!("saved \"{}\" to {}", figure.title(), path.display());
    Ok(Some(path.to_path_buf()))
}

/// Text for the Latin-1 re-encoded fonts: Latin-1 characters become octal escapes (`£` is
/// `\243`), anything beyond Latin-1 becomes `?`.
fn ps_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii() => out.push(c),
            c if (c as u32) <= 0xFF => out.push_str(&format!("\\{:03o}", c as u32)),
            _ => out.push('?'),
        }
    }
    out
}

/// Generate "nice" tick values in [min, max] with roughly max_ticks steps.
fn nice_ticks(min: f64, max: f64, max_ticks: usize) -> Vec<f64> {
    let range = if max > min { max - min } else { 1.0 };
    if max_ticks == 0 {
        return vec![min];
    }
    let raw_step = range / (max_ticks as f64).max(1.0);
    let mag = 10.0_f64.powf(raw_step.log10().floor());
    let norm = if mag > 0.0 { raw_step / mag } else { raw_step };
    let step = if norm <= 1.0 {
        1.0 * mag
    } else if norm <= 2.0 {
        2.0 * mag
    } else if norm <= 5.0 {
        5.0 * mag
    } else {
        10.0 * mag
    };
    let step = step.max(f64::EPSILON);
    let start = (min / step).floor() * step;
    let mut ticks = Vec::new();
    let mut v = start;
    while v <= max + step * 0.001 {
        if v >= min - step * 0.001 {
            ticks.push(v);
        }
        v += step;
        if ticks.len() > max_ticks + 2 {
            break;
        }
    }
    if ticks.is_empty() {
        ticks.push(min);
    }
    ticks
}

/// Format a tick value for display: thousands-grouped integer when whole, else one decimal.
fn format_tick(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if (v - v.round()).abs() < 1e-9 && v.abs() < 1e15 {
        let digits = format!("{:.0}", v.abs());
        let sign = if v < 0.0 { "-" } else { "" };
        format!("{}{}", sign, crate::summary::group_digits(&digits))
    } else {
        format!("{:.1}", v)
    }
}

/// Upper y bound leaving headroom for the annotations above the tallest bar.
fn bar_axis_top(max_value: f64) -> f64 {
    if max_value > 0.0 {
        max_value * 1.15
    } else {
        1.0
    }
}

fn ps_rgb(c: Rgb) -> String {
    format!(
        "{:.3} {:.3} {:.3} setrgbcolor",
        c.0 as f64 / 255.0,
        c.1 as f64 / 255.0,
        c.2 as f64 / 255.0
    )
}

fn eps_header(f: &mut impl Write, w: f64, h: f64) -> Result<()> {
    writeln!(f, "%!PS-Adobe-3.0 EPSF-3.0")?;
    writeln!(f, "%%BoundingBox: 0 0 {} {}", w.ceil() as i32, h.ceil() as i32)?;
    writeln!(f, "%%Creator: rfmdash")?;
    writeln!(f, "%%EndComments")?;
    writeln!(
        f,
        "/latin1 {{ findfont dup length dict begin {{ 1 index /FID ne {{ def }} {{ pop pop }} ifelse }} forall /Encoding ISOLatin1Encoding def currentdict end definefont pop }} bind def"
    )?;
    writeln!(f, "/Helvetica-L1 /Helvetica latin1")?;
    writeln!(f, "/Helvetica-Bold-L1 /Helvetica-Bold latin1")?;
    writeln!(f, "gsave")?;
    writeln!(f, "1 setlinewidth")?;
    Ok(())
}

fn eps_footer(f: &mut impl Write) -> Result<()> {
    writeln!(f, "grestore")?;
    writeln!(f, "%%EOF")?;
    Ok(())
}

const CHAR_W: f64 = 5.0;

/// Show `text` horizontally centered on `cx`.
fn eps_centered(f: &mut impl Write, cx: f64, y: f64, text: &str) -> Result<()> {
    let w = text.chars().count() as f64 * CHAR_W;
    writeln!(f, "{} {} moveto ({}) show", cx - w / 2.0, y, ps_text(text))?;
    Ok(())
}

/// Title at the top and axis titles below / left of the plot box.
fn eps_titles(
    f: &mut impl Write,
    w: f64,
    h: f64,
    plot: (f64, f64, f64, f64),
    title: &str,
    x_label: &str,
    y_label: &str,
) -> Result<()> {
    let (left, bottom, plot_w, plot_h) = plot;
    writeln!(f, "0 setgray")?;
    writeln!(f, "/Helvetica-Bold-L1 findfont 12 scalefont setfont")?;
    eps_centered(f, w / 2.0, h - 18.0, title)?;
    writeln!(f, "/Helvetica-L1 findfont 10 scalefont setfont")?;
    eps_centered(f, left + plot_w / 2.0, bottom - 30.0, x_label)?;
    writeln!(f, "gsave")?;
    writeln!(f, "14 {} translate 90 rotate", bottom + plot_h / 2.0)?;
    eps_centered(f, 0.0, 0.0, y_label)?;
    writeln!(f, "grestore")?;
    Ok(())
}

/// Write a bar figure as EPS: grid, one filled bar per category, annotations, axis labels.
pub fn write_bar_eps(path: &Path, figure: &BarFigure) -> Result<()> {
    const W: f64 = 500.0;
    const H: f64 = 300.0;
    const LEFT: f64 = 70.0;
    const BOTTOM: f64 = 50.0;
    const PLOT_W: f64 = W - LEFT - 20.0;
    const PLOT_H: f64 = H - BOTTOM - 40.0;

    let top = bar_axis_top(figure.max_value());
    let to_y = |v: f64| BOTTOM + v / top * PLOT_H;
    let n = figure.bars.len().max(1) as f64;
    let slot = PLOT_W / n;

    let mut f = BufWriter::new(File::create(path)?);
    eps_header(&mut f, W, H)?;

    // Horizontal grid and y tick labels
    writeln!(f, "/Helvetica-L1 findfont 9 scalefont setfont")?;
    for v in nice_ticks(0.0, top, 6) {
        let py = to_y(v);
        if py > BOTTOM + PLOT_H {
            continue;
        }
        writeln!(f, "0.85 setgray 0.5 setlinewidth")?;
        writeln!(f, "{} {} moveto {} 0 rlineto stroke", LEFT, py, PLOT_W)?;
        writeln!(f, "0 setgray")?;
        let s = format_tick(v);
        let tx = LEFT - s.len() as f64 * CHAR_W - 4.0;
        writeln!(f, "{} {} moveto ({}) show", tx, py - 3.0, ps_text(&s))?;
    }

    // Axis box
    writeln!(f, "1 setlinewidth 0 setgray")?;
    writeln!(f, "{} {} {} {} rectstroke", LEFT, BOTTOM, PLOT_W, PLOT_H)?;

    for (i, bar) in figure.bars.iter().enumerate() {
        let cx = LEFT + (i as f64 + 0.5) * slot;
        let bw = slot * 0.7;
        let h = to_y(bar.value.max(0.0)) - BOTTOM;
        writeln!(f, "{}", ps_rgb(bar.color))?;
        writeln!(f, "{} {} {} {} rectfill", cx - bw / 2.0, BOTTOM, bw, h)?;
        writeln!(f, "0 setgray 0.6 setlinewidth")?;
        writeln!(f, "{} {} {} {} rectstroke", cx - bw / 2.0, BOTTOM, bw, h)?;

        writeln!(f, "/Helvetica-Bold-L1 findfont 9 scalefont setfont")?;
        eps_centered(&mut f, cx, BOTTOM + h + 4.0, &bar.label)?;
        writeln!(f, "/Helvetica-L1 findfont 9 scalefont setfont")?;
        eps_centered(&mut f, cx, BOTTOM - 14.0, bar.category)?;
    }

    eps_titles(
        &mut f,
        W,
        H,
        (LEFT, BOTTOM, PLOT_W, PLOT_H),
        figure.title,
        figure.x_label,
        figure.y_label,
    )?;
    eps_footer(&mut f)?;
    f.into_inner()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to flush {}: {}", path.display(), e))?
        .sync_all()?;
    Ok(())
}

/// Write a heatmap figure as EPS: colored cells with annotations, row/column labels, color bar.
pub fn write_heatmap_eps(path: &Path, figure: &HeatmapFigure) -> Result<()> {
    const W: f64 = 480.0;
    const H: f64 = 300.0;
    const LEFT: f64 = 100.0;
    const BOTTOM: f64 = 50.0;
    const BAR_W: f64 = 12.0;
    const PLOT_W: f64 = W - LEFT - 70.0;
    const PLOT_H: f64 = H - BOTTOM - 40.0;

    let rows = figure.row_labels.len().max(1) as f64;
    let cols = figure.col_labels.len().max(1) as f64;
    let cell_w = PLOT_W / cols;
    let cell_h = PLOT_H / rows;

    let mut f = BufWriter::new(File::create(path)?);
    eps_header(&mut f, W, H)?;
    writeln!(f, "/Helvetica-L1 findfont 9 scalefont setfont")?;

    for (r, row) in figure.annotations.iter().enumerate() {
        // Row 0 at the top
        let y = BOTTOM + PLOT_H - (r as f64 + 1.0) * cell_h;
        for (c, annotation) in row.iter().enumerate() {
            let x = LEFT + c as f64 * cell_w;
            let color = figure.cell_color(r, c);
            writeln!(f, "{}", ps_rgb(color))?;
            writeln!(f, "{} {} {} {} rectfill", x, y, cell_w, cell_h)?;
            writeln!(f, "1 setgray 0.5 setlinewidth")?;
            writeln!(f, "{} {} {} {} rectstroke", x, y, cell_w, cell_h)?;
            writeln!(f, "{}", ps_rgb(text_color_on(color)))?;
            eps_centered(&mut f, x + cell_w / 2.0, y + cell_h / 2.0 - 3.0, annotation)?;
        }
        writeln!(f, "0 setgray")?;
        if let Some(label) = figure.row_labels.get(r) {
            let tx = LEFT - label.len() as f64 * CHAR_W - 6.0;
            writeln!(f, "{} {} moveto ({}) show", tx, y + cell_h / 2.0 - 3.0, ps_text(label))?;
        }
    }
    writeln!(f, "0 setgray")?;
    for (c, label) in figure.col_labels.iter().enumerate() {
        eps_centered(&mut f, LEFT + (c as f64 + 0.5) * cell_w, BOTTOM - 14.0, label)?;
    }

    // Color bar
    if let Some((lo, hi)) = figure.value_range() {
        let bar_x = LEFT + PLOT_W + 16.0;
        const STEPS: usize = 40;
        let step_h = PLOT_H / STEPS as f64;
        for i in 0..STEPS {
            let t = (i as f64 + 0.5) / STEPS as f64;
            writeln!(f, "{}", ps_rgb(crate::categories::ylgnbu(t)))?;
            writeln!(
                f,
                "{} {} {} {} rectfill",
                bar_x,
                BOTTOM + i as f64 * step_h,
                BAR_W,
                step_h
            )?;
        }
        writeln!(f, "0 setgray")?;
        writeln!(f, "{} {} moveto ({}) show", bar_x + BAR_W + 3.0, BOTTOM, format_tick(lo))?;
        writeln!(
            f,
            "{} {} moveto ({}) show",
            bar_x + BAR_W + 3.0,
            BOTTOM + PLOT_H - 8.0,
            format_tick(hi)
        )?;
    }

    eps_titles(
        &mut f,
        W,
        H,
        (LEFT, BOTTOM, PLOT_W, PLOT_H),
        figure.title,
        figure.x_label,
        figure.y_label,
    )?;
    eps_footer(&mut f)?;
    f.into_inner()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to flush {}: {}", path.display(), e))?
        .sync_all()?;
    Ok(())
}

fn rgb_color(c: Rgb) -> plotters::style::RGBColor {
    plotters::style::RGBColor(c.0, c.1, c.2)
}

/// Write a bar figure to PNG using plotters bitmap backend.
pub fn write_bar_png(path: &Path, figure: &BarFigure, size: (u32, u32)) -> Result<()> {
    use plotters::prelude::*;
    use plotters::style::text_anchor::{HPos, Pos, VPos};

    let n = figure.bars.len();
    let top = bar_axis_top(figure.max_value());
    let labels: Vec<&str> = figure.bars.iter().map(|b| b.category).collect();

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(figure.title, ("sans-serif", 30).into_font().style(FontStyle::Bold))
        .margin(30)
        .x_label_area_size(70)
        .y_label_area_size(110)
        .build_cartesian_2d((0..n).into_segmented(), 0f64..top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(WHITE)
        .bold_line_style(BLACK.mix(0.15))
        .x_labels(n)
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => labels.get(*i).map(|s| s.to_string()).unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|v| format_tick(*v))
        .x_desc(figure.x_label)
        .y_desc(figure.y_label)
        .label_style(("sans-serif", 20))
        .axis_desc_style(("sans-serif", 22))
        .draw()?;

    chart.draw_series(figure.bars.iter().enumerate().map(|(i, bar)| {
        let mut rect = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), bar.value.max(0.0)),
            ],
            rgb_color(bar.color).filled(),
        );
        rect.set_margin(0, 0, 40, 40);
        rect
    }))?;

    let annotation_style = TextStyle::from(("sans-serif", 20).into_font().style(FontStyle::Bold))
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(figure.bars.iter().enumerate().map(|(i, bar)| {
        Text::new(
            bar.label.clone(),
            (SegmentValue::CenterOf(i), bar.value.max(0.0) + top * 0.01),
            annotation_style.clone(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// Write a heatmap figure to PNG using plotters bitmap backend, with a color bar on the right.
pub fn write_heatmap_png(path: &Path, figure: &HeatmapFigure, size: (u32, u32)) -> Result<()> {
    use plotters::prelude::*;
    use plotters::style::text_anchor::{HPos, Pos, VPos};

    let rows = figure.row_labels.len();
    let cols = figure.col_labels.len();

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        figure.title,
        ("sans-serif", 30).into_font().style(FontStyle::Bold),
    )?;
    let split = (size.0 as i32 - 170).max(1);
    let (main, colorbar) = root.split_horizontally(split);

    let mut chart = ChartBuilder::on(&main)
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(150)
        .build_cartesian_2d((0..cols).into_segmented(), (0..rows).into_segmented())?;

    // Row 0 is drawn at the top, so segment y holds row `rows - 1 - y`.
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(cols)
        .y_labels(rows)
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(c) => figure
                .col_labels
                .get(*c)
                .map(|s| s.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|v| match v {
            SegmentValue::CenterOf(y) if *y < rows => figure.row_labels[rows - 1 - *y].to_string(),
            _ => String::new(),
        })
        .x_desc(figure.x_label)
        .y_desc(figure.y_label)
        .label_style(("sans-serif", 20))
        .axis_desc_style(("sans-serif", 22))
        .draw()?;

    let cells: Vec<(usize, usize)> = (0..rows)
        .flat_map(|r| (0..cols).map(move |c| (r, c)))
        .collect();

    chart.draw_series(cells.iter().map(|&(r, c)| {
        let y = rows - 1 - r;
        let mut rect = Rectangle::new(
            [
                (SegmentValue::Exact(c), SegmentValue::Exact(y)),
                (SegmentValue::Exact(c + 1), SegmentValue::Exact(y + 1)),
            ],
            rgb_color(figure.cell_color(r, c)).filled(),
        );
        rect.set_margin(1, 1, 1, 1);
        rect
    }))?;

    chart.draw_series(cells.iter().map(|&(r, c)| {
        let y = rows - 1 - r;
        let style = TextStyle {
            font: ("sans-serif", 22).into_font(),
            color: rgb_color(text_color_on(figure.cell_color(r, c))).to_backend_color(),
            pos: Pos::new(HPos::Center, VPos::Center),
        };
        Text::new(
            figure.annotations[r][c].clone(),
            (SegmentValue::CenterOf(c), SegmentValue::CenterOf(y)),
            style,
        )
    }))?;

    if let Some((lo, hi)) = figure.value_range() {
        let hi = if hi > lo { hi } else { lo + 1.0 };
        let mut bar = ChartBuilder::on(&colorbar)
            .margin_top(20)
            .margin_bottom(90)
            .margin_right(10)
            .y_label_area_size(70)
            .right_y_label_area_size(0)
            .build_cartesian_2d(0f64..1f64, lo..hi)?;
        bar.configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_label_formatter(&|v| format_tick(*v))
            .y_desc(figure.colorbar_label)
            .label_style(("sans-serif", 18))
            .axis_desc_style(("sans-serif", 18))
            .draw()?;
        const STEPS: usize = 100;
        let step = (hi - lo) / STEPS as f64;
        bar.draw_series((0..STEPS).map(|i| {
            let v0 = lo + i as f64 * step;
            let t = (i as f64 + 0.5) / STEPS as f64;
            Rectangle::new(
                [(0.0, v0), (1.0, v0 + step)],
                rgb_color(crate::categories::ylgnbu(t)).filled(),
            )
        }))?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::bars::{category_count_chart, value_tier_revenue_chart};
    use crate::charts::heatmap::value_vs_shipping_heatmap;
    use polars::prelude::*;
    use std::io::Read;

    fn read(path: &Path) -> String {
        let mut content = String::new();
        File::open(path)
            .expect("open")
            .read_to_string(&mut content)
            .expect("read");
        content
    }

    fn tier_figure() -> Figure {
        let df = df!("value_tier" => &["High Value", "High Value", "Mid Value", "Low Value"]).unwrap();
        Figure::Bar(
            category_count_chart(&df, &crate::categories::VALUE_TIER, "Customers").unwrap(),
        )
    }

    /// Verifies that EPS output contains expected structural elements: header, axis box, bars in
    /// palette colors, annotations, category labels and axis titles.
    #[test]
    fn bar_eps_contains_desired_elements() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("chart.eps");
        save_figure(&tier_figure(), Some(&path), &ExportOptions::default()).expect("save");

        let content = read(&path);
        assert!(content.contains("%!PS-Adobe-3.0 EPSF-3.0"), "EPS header");
        assert!(content.contains("%%Creator: rfmdash"), "Creator");
        assert!(content.contains("rectstroke"), "axis box / bar outline");
        assert_eq!(content.matches("rectfill").count(), 3, "one bar per tier");
        assert!(content.contains("0.106 0.369 0.125 setrgbcolor"), "High Value green");
        assert!(content.contains("(50.0%) show"), "annotation");
        assert!(content.contains("(Mid Value) show"), "category label");
        assert!(content.contains("(Value Tier \\(RFM-Based\\)) show"), "x axis title");
        assert!(content.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn heatmap_eps_marks_undefined_rows() {
        let df = df!(
            "value_tier" => &["High Value", "Low Value"],
            "ship_bucket" => &["Reliable", "Critical"]
        )
        .unwrap();
        let fig = Figure::Heatmap(value_vs_shipping_heatmap(&df).unwrap());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heat.eps");
        save_figure(&fig, Some(&path), &ExportOptions::default()).unwrap();

        let content = read(&path);
        assert_eq!(content.matches("(n/a) show").count(), 4, "Mid Value row");
        assert!(content.contains("(100.0%) show"));
        assert!(content.contains("(Value Tier \\327 Shipping Reliability \\(%\\)) show"));
    }

    #[test]
    fn currency_labels_use_latin1_escapes() {
        let df = df!(
            "value_tier" => &["High Value", "Low Value"],
            "monetary_sales" => &[3000.0, 20.0]
        )
        .unwrap();
        let fig = Figure::Bar(value_tier_revenue_chart(&df, "£").unwrap());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("revenue.eps");
        save_figure(&fig, Some(&path), &ExportOptions::default()).unwrap();

        let content = read(&path);
        assert!(content.contains("/Encoding ISOLatin1Encoding def"));
        assert!(content.contains("/Helvetica-L1 findfont"));
        assert!(content.contains("(\\2433,000) show"));
        assert!(content.contains("(\\24320) show"));
        assert!(!content.contains('?'));
    }

    #[test]
    fn save_creates_nested_directories_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets").join("screenshots").join("01.eps");
        let written = save_figure(&tier_figure(), Some(&path), &ExportOptions::default()).unwrap();
        assert_eq!(written.as_deref(), Some(path.as_path()));
        let first = read(&path);

        // Pre-existing junk is replaced, not appended to.
        fs::write(&path, "junk that is longer than nothing").unwrap();
        save_figure(&tier_figure(), Some(&path), &ExportOptions::default()).unwrap();
        assert_eq!(read(&path), first);
    }

    #[test]
    fn save_without_path_is_noop() {
        assert_eq!(
            save_figure(&tier_figure(), None, &ExportOptions::default()).unwrap(),
            None
        );
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            ChartExportFormat::from_path(Path::new("a/b.EPS")),
            ChartExportFormat::Eps
        );
        assert_eq!(
            ChartExportFormat::from_path(Path::new("a/b.png")),
            ChartExportFormat::Png
        );
        assert_eq!(
            ChartExportFormat::from_path(Path::new("noext")),
            ChartExportFormat::Png
        );
        assert_eq!(ChartExportFormat::Eps.extension(), "eps");
    }

    #[test]
    fn ticks_and_labels() {
        assert_eq!(nice_ticks(0.0, 10.0, 5), [0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(25000.0), "25,000");
        assert_eq!(format_tick(2.5), "2.5");
        assert_eq!(ps_text("a×b (c)"), "a\\327b \\(c\\)");
        assert_eq!(ps_text("£3,000"), "\\2433,000");
        assert_eq!(ps_text("€5 \\"), "?5 \\\\");
    }
}
