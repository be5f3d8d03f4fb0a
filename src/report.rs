// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Run reports: a JSON document with everything needed to plot a run, and
//! a plain-text summary for the console.

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::circuit::ParameterSet;
use crate::error::Result;
use crate::synthesis::{SynthesisConfig, SynthesisResult};

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SPARK_WIDTH: usize = 60;

/// Complex matrix as separate real and imaginary row lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexMatrix {
    pub real: Vec<Vec<f64>>,
    pub imag: Vec<Vec<f64>>,
}

impl From<&Array2<Complex64>> for ComplexMatrix {
    fn from(m: &Array2<Complex64>) -> Self {
        let rows = |part: fn(&Complex64) -> f64| -> Vec<Vec<f64>> {
            m.rows()
                .into_iter()
                .map(|row| row.iter().map(part).collect())
                .collect()
        };
        Self {
            real: rows(|z| z.re),
            imag: rows(|z| z.im),
        }
    }
}

/// Serializable record of a synthesis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisReport {
    /// Crate version that produced the report
    pub version: String,
    pub config: SynthesisConfig,
    pub iterations: usize,
    pub cost_history: Vec<f64>,
    pub mean_overlap_history: Vec<f64>,
    /// Per-input overlaps of the last iteration
    pub final_overlaps: Vec<f64>,
    pub target: ComplexMatrix,
    pub learned: ComplexMatrix,
    pub process_fidelity: f64,
    pub leakage: f64,
    pub parameters: ParameterSet,
}

impl SynthesisReport {
    pub fn from_result(config: &SynthesisConfig, result: &SynthesisResult) -> Self {
        Self {
            version: crate::VERSION.to_string(),
            config: config.clone(),
            iterations: result.iterations,
            cost_history: result.cost_history(),
            mean_overlap_history: result.mean_overlap_history(),
            final_overlaps: result
                .final_record()
                .map(|r| r.overlaps.clone())
                .unwrap_or_default(),
            target: ComplexMatrix::from(&result.target),
            learned: ComplexMatrix::from(&result.learned),
            process_fidelity: result.process_fidelity,
            leakage: result.leakage,
            parameters: result.parameters.clone(),
        }
    }

    /// Write the report as pretty-printed JSON, creating parent directories.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn read_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Console summary: cost trace, target vs learned blocks, fidelity.
    pub fn render_summary(&self) -> String {
        let mut out = String::new();
        let first = self.cost_history.first().copied().unwrap_or(f64::NAN);
        let last = self.cost_history.last().copied().unwrap_or(f64::NAN);
        let overlap = self
            .mean_overlap_history
            .last()
            .copied()
            .unwrap_or(f64::NAN);

        let lines = [
            format!(
                "Synthesis: D={} d={} depth={} iterations={}",
                self.config.cutoff, self.config.gate_cutoff, self.config.depth, self.iterations
            ),
            format!("Cost  {first:.4} -> {last:.4}"),
            format!("      {}", sparkline(&self.cost_history, SPARK_WIDTH)),
            format!("Mean overlap (final)  {overlap:.6}"),
            String::new(),
            render_pair("Re", &self.target.real, &self.learned.real),
            String::new(),
            render_pair("Im", &self.target.imag, &self.learned.imag),
            String::new(),
            format!("Leakage           {:.3e}", self.leakage),
            format!("Process fidelity  {:.6}", self.process_fidelity),
        ];
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

/// One-line trace of `values`, downsampled to at most `width` glyphs.
///
/// Higher values map to taller bars; a constant series is drawn flat.
pub fn sparkline(values: &[f64], width: usize) -> String {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || width == 0 {
        return String::new();
    }
    let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = hi - lo;

    let buckets = width.min(finite.len());
    (0..buckets)
        .map(|b| {
            let idx = b * finite.len() / buckets;
            let level = if span > 0.0 {
                ((finite[idx] - lo) / span * (SPARK_LEVELS.len() - 1) as f64).round() as usize
            } else {
                0
            };
            SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

/// Side-by-side grid of one component of target and learned, each cell
/// prefixed by a shade glyph for its magnitude.
fn render_pair(label: &str, target: &[Vec<f64>], learned: &[Vec<f64>]) -> String {
    let cols = target.first().map_or(0, Vec::len);
    let width = cols * 7;
    let header = format!(
        "{:<width$}   {}",
        format!("{label}(target)"),
        format!("{label}(learned)")
    );
    let mut out = header;
    for (t_row, l_row) in target.iter().zip(learned) {
        out.push('\n');
        out.push_str(&format!(
            "{:<width$}   {}",
            render_row(t_row),
            render_row(l_row)
        ));
    }
    out
}

fn render_row(row: &[f64]) -> String {
    row.iter()
        .map(|&v| format!("{}{:+.2} ", shade(v), v))
        .collect()
}

fn shade(v: f64) -> char {
    match v.abs() {
        a if a >= 0.75 => '█',
        a if a >= 0.5 => '▓',
        a if a >= 0.25 => '▒',
        a if a >= 0.05 => '░',
        _ => ' ',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::target::fourier_unitary;
    use crate::synthesis::IterationRecord;

    fn sample_result() -> SynthesisResult {
        let target = fourier_unitary(2);
        SynthesisResult {
            parameters: ParameterSet::zeros(1),
            history: vec![
                IterationRecord {
                    iteration: 0,
                    cost: 2.0,
                    mean_overlap: 0.0,
                    overlaps: vec![0.0, 0.0],
                },
                IterationRecord {
                    iteration: 1,
                    cost: 0.5,
                    mean_overlap: 0.75,
                    overlaps: vec![0.8, 0.7],
                },
            ],
            outputs: Array2::<Complex64>::eye(3).slice(ndarray::s![.., ..2]).to_owned(),
            learned: target.clone(),
            target,
            process_fidelity: 1.0,
            leakage: 0.0,
            iterations: 2,
        }
    }

    #[test]
    fn test_report_from_result() {
        let report = SynthesisReport::from_result(&SynthesisConfig::default(), &sample_result());
        assert_eq!(report.cost_history, vec![2.0, 0.5]);
        assert_eq!(report.mean_overlap_history, vec![0.0, 0.75]);
        assert_eq!(report.final_overlaps, vec![0.8, 0.7]);
        assert_eq!(report.target.real.len(), 2);
        assert_eq!(report.version, crate::VERSION);
    }

    #[test]
    fn test_report_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        let report = SynthesisReport::from_result(&SynthesisConfig::default(), &sample_result());
        report.write_json(&path).unwrap();

        let loaded = SynthesisReport::read_json(&path).unwrap();
        assert_eq!(loaded.config, report.config);
        assert_eq!(loaded.cost_history, report.cost_history);
        assert_eq!(loaded.parameters, report.parameters);
        for (a, b) in loaded.target.real.iter().flatten().zip(report.target.real.iter().flatten()) {
            assert!((a - b).abs() < 1e-15);
        }
    }

    #[test]
    fn test_complex_matrix_layout() {
        let mut m = Array2::<Complex64>::zeros((2, 2));
        m[[0, 1]] = Complex64::new(0.25, -0.5);
        let cm = ComplexMatrix::from(&m);
        assert_eq!(cm.real[0][1], 0.25);
        assert_eq!(cm.imag[0][1], -0.5);
        assert_eq!(cm.real[1][0], 0.0);
    }

    #[test]
    fn test_render_summary_mentions_fidelity() {
        let report = SynthesisReport::from_result(&SynthesisConfig::default(), &sample_result());
        let text = report.render_summary();
        assert!(text.contains("Process fidelity  1.000000"));
        assert!(text.contains("Re(target)"));
        assert!(text.contains("Im(learned)"));
        assert!(text.contains("2.0000 -> 0.5000"));

        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("Synthesis: D=10 d=4"));
        assert_eq!(lines[4], "");
        // Header plus one row per target row, for both components
        let re = lines.iter().position(|l| l.starts_with("Re(target)")).unwrap();
        let im = lines.iter().position(|l| l.starts_with("Im(target)")).unwrap();
        assert_eq!(im - re, 4);
        assert_eq!(lines.last().copied(), Some("Process fidelity  1.000000"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_sparkline() {
        assert_eq!(sparkline(&[3.0, 2.0, 1.0, 0.0], 10), "█▆▃▁");
        assert_eq!(sparkline(&[1.0, 1.0], 10), "▁▁");
        assert_eq!(sparkline(&[], 10), "");
        let long: Vec<f64> = (0..1000).map(f64::from).collect();
        assert_eq!(sparkline(&long, 60).chars().count(), 60);
    }
}
