//! Module for reading and writing TSP instances.
//!
//! An instance file is a plain distance matrix: one row per line, values
//! separated by whitespace, blank lines ignored. The expected optimum may be
//! encoded in the file name as a trailing number, e.g. `tsp1_253.txt`.

use crate::error::LoadError;
use crate::heuristics::mst::build_mst;
use crate::matrix::DistanceMatrix;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// A named distance matrix loaded from disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TspInstance {
    /// Name of the instance (file stem)
    pub name: String,
    /// Edge weights
    pub matrix: DistanceMatrix,
    /// Optimal cost advertised by the file name, if any
    pub reference_optimum: Option<f64>,
}

impl TspInstance {
    pub fn new(name: &str, matrix: DistanceMatrix, reference_optimum: Option<f64>) -> Self {
        TspInstance {
            name: name.to_string(),
            matrix,
            reference_optimum,
        }
    }

    /// Parse an instance from a matrix file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::FileNotFound(path.to_path_buf()),
            _ => LoadError::Io(e),
        })?;

        let matrix = parse_matrix(BufReader::new(file))?;
        if !matrix.is_symmetric(1e-9) {
            log::warn!("{:?} is not symmetric; only weight(i, j) with i < j drives the MST", path);
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let reference_optimum = path
            .file_name()
            .and_then(|s| s.to_str())
            .and_then(reference_optimum_from_name);

        log::debug!(
            "loaded {} (n={}, reference={:?})",
            name,
            matrix.size(),
            reference_optimum
        );

        Ok(TspInstance {
            name,
            matrix,
            reference_optimum,
        })
    }

    pub fn dimension(&self) -> usize {
        self.matrix.size()
    }

    /// Get statistics about the instance
    pub fn statistics(&self) -> InstanceStatistics {
        let weights: Vec<f64> = self.matrix.upper_triangle().collect();
        let (min_weight, avg_weight, max_weight) = if weights.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            (
                weights.iter().cloned().fold(f64::INFINITY, f64::min),
                weights.iter().sum::<f64>() / weights.len() as f64,
                weights.iter().cloned().fold(0.0, f64::max),
            )
        };

        InstanceStatistics {
            name: self.name.clone(),
            dimension: self.dimension(),
            symmetric: self.matrix.is_symmetric(1e-9),
            metric: self.matrix.triangle_violation(1e-9).is_none(),
            min_weight,
            avg_weight,
            max_weight,
            mst_weight: build_mst(&self.matrix).ok().map(|t| t.total_weight()),
            reference_optimum: self.reference_optimum,
        }
    }
}

/// Read a distance matrix, one row per non-blank line.
pub fn parse_matrix<R: BufRead>(reader: R) -> Result<DistanceMatrix, LoadError> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut width = None;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        let row = line
            .split_whitespace()
            .map(|token| parse_weight(token, line_no))
            .collect::<Result<Vec<f64>, LoadError>>()?;

        let expected = *width.get_or_insert(row.len());
        if row.len() != expected {
            return Err(LoadError::malformed(
                line_no,
                format!("expected {} values, found {}", expected, row.len()),
            ));
        }

        rows.push(row);
    }

    if rows.is_empty() {
        return Err(LoadError::malformed(0, "no matrix rows found"));
    }

    Ok(DistanceMatrix::from_rows(rows)?)
}

fn parse_weight(token: &str, line_no: usize) -> Result<f64, LoadError> {
    let value: f64 = token
        .parse()
        .map_err(|_| LoadError::malformed(line_no, format!("invalid number '{}'", token)))?;

    if !value.is_finite() || value < 0.0 {
        return Err(LoadError::malformed(
            line_no,
            format!("weight must be finite and non-negative, got {}", token),
        ));
    }
    Ok(value)
}

/// Extract the expected optimal cost from a file name ending in `_<digits>.txt`.
pub fn reference_optimum_from_name(file_name: &str) -> Option<f64> {
    let pattern = Regex::new(r"_(\d+)\.txt$").ok()?;
    pattern
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Serialize a matrix in the format read by [`parse_matrix`].
pub fn matrix_to_text(matrix: &DistanceMatrix) -> String {
    let mut text = String::new();
    for row in matrix.rows() {
        let line: Vec<String> = row.iter().map(|w| w.to_string()).collect();
        text.push_str(&line.join(" "));
        text.push('\n');
    }
    text
}

pub fn write_matrix_file<P: AsRef<Path>>(matrix: &DistanceMatrix, path: P) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(matrix_to_text(matrix).as_bytes())?;
    file.flush()
}

/// Distance matrix of `n` random points in a `scale × scale` square.
///
/// Deterministic via `seed`. With `integral` every distance is rounded to the
/// nearest integer, which may break the triangle inequality by up to 1.
pub fn random_euclidean(n: usize, seed: u64, scale: f64, integral: bool) -> DistanceMatrix {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.gen::<f64>() * scale, rng.gen::<f64>() * scale))
        .collect();

    let mut rows = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i + 1..n {
            let dx = points[i].0 - points[j].0;
            let dy = points[i].1 - points[j].1;
            let mut d = (dx * dx + dy * dy).sqrt();
            if integral {
                d = d.round();
            }
            rows[i][j] = d;
            rows[j][i] = d;
        }
    }

    DistanceMatrix::from_square_rows(rows)
}

/// Statistics about a TSP instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceStatistics {
    pub name: String,
    pub dimension: usize,
    pub symmetric: bool,
    pub metric: bool,
    pub min_weight: f64,
    pub avg_weight: f64,
    pub max_weight: f64,
    /// Weight of the minimum spanning tree, a lower bound on the optimal tour
    pub mst_weight: Option<f64>,
    pub reference_optimum: Option<f64>,
}

impl std::fmt::Display for InstanceStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Instance: {}", self.name)?;
        writeln!(f, "  Vertices: {}", self.dimension)?;
        writeln!(f, "  Symmetric: {}", self.symmetric)?;
        writeln!(f, "  Triangle inequality: {}", self.metric)?;
        writeln!(f, "  Min weight: {:.2}", self.min_weight)?;
        writeln!(f, "  Avg weight: {:.2}", self.avg_weight)?;
        writeln!(f, "  Max weight: {:.2}", self.max_weight)?;
        if let Some(w) = self.mst_weight {
            writeln!(f, "  MST weight (lower bound): {:.2}", w)?;
        }
        match self.reference_optimum {
            Some(opt) => writeln!(f, "  Expected optimum: {:.2}", opt),
            None => writeln!(f, "  Expected optimum: unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TspError;
    use std::io::Cursor;

    #[test]
    fn test_parse_ignores_blank_lines() {
        let text = "0 1 2\n\n  1 0 1  \n2 1 0\n\n";
        let m = parse_matrix(Cursor::new(text)).unwrap();
        assert_eq!(m.size(), 3);
        assert_eq!(m.distance(0, 2), 2.0);
        assert_eq!(m.distance(1, 2), 1.0);
    }

    #[test]
    fn test_parse_floats() {
        let m = parse_matrix(Cursor::new("0 2.5\n2.5 0.0\n")).unwrap();
        assert_eq!(m.distance(0, 1), 2.5);
    }

    #[test]
    fn test_parse_rejects_bad_tokens() {
        let err = parse_matrix(Cursor::new("0 1\n1 x\n")).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { line: 2, .. }));

        let err = parse_matrix(Cursor::new("0 -1\n-1 0\n")).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { line: 1, .. }));

        let err = parse_matrix(Cursor::new("0 inf\ninf 0\n")).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        let err = parse_matrix(Cursor::new("0 1 2\n\n1 0\n")).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { line: 3, .. }));

        let err = parse_matrix(Cursor::new("0 1 2\n1 0 1\n")).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Shape(TspError::NonSquareMatrix { rows: 2, columns: 3 })
        ));

        let err = parse_matrix(Cursor::new("\n \n")).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { line: 0, .. }));
    }

    #[test]
    fn test_reference_optimum_from_name() {
        assert_eq!(reference_optimum_from_name("tsp1_253.txt"), Some(253.0));
        assert_eq!(reference_optimum_from_name("tsp5_27603.txt"), Some(27603.0));
        assert_eq!(reference_optimum_from_name("tsp1.txt"), None);
        assert_eq!(reference_optimum_from_name("tsp1_253.csv"), None);
        assert_eq!(reference_optimum_from_name("tsp_12a.txt"), None);
    }

    #[test]
    fn test_from_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("instancias/five_d_19.txt");
        let instance = TspInstance::from_file(&path).unwrap();
        assert_eq!(instance.name, "five_d_19");
        assert_eq!(instance.dimension(), 5);
        assert_eq!(instance.reference_optimum, Some(19.0));
    }

    #[test]
    fn test_missing_file() {
        let err = TspInstance::from_file("instancias/does_not_exist_1.txt").unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound(_)));
    }

    #[test]
    fn test_text_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen_7.txt");
        let m = random_euclidean(6, 1, 50.0, true);

        write_matrix_file(&m, &path).unwrap();
        let instance = TspInstance::from_file(&path).unwrap();
        assert_eq!(instance.matrix, m);
        assert_eq!(instance.reference_optimum, Some(7.0));
    }

    #[test]
    fn test_random_euclidean_is_metric() {
        let m = random_euclidean(12, 5, 100.0, false);
        assert_eq!(m.size(), 12);
        assert!(m.is_symmetric(0.0));
        assert_eq!(m.triangle_violation(1e-9), None);
        assert_eq!(m, random_euclidean(12, 5, 100.0, false));
    }

    #[test]
    fn test_statistics() {
        let m = parse_matrix(Cursor::new("0 1 2\n1 0 1\n2 1 0\n")).unwrap();
        let stats = TspInstance::new("line", m, None).statistics();
        assert_eq!(stats.dimension, 3);
        assert!(stats.symmetric);
        assert!(stats.metric);
        assert_eq!(stats.min_weight, 1.0);
        assert_eq!(stats.max_weight, 2.0);
        assert_eq!(stats.mst_weight, Some(2.0));
        assert!(stats.to_string().contains("Expected optimum: unknown"));
    }
}
