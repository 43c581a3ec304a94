//! Leader-follower document clustering
//!
//! Documents are columns of the frequency matrix, min-max scaled over the
//! whole matrix. Leaders are sampled uniformly without replacement and every
//! other document follows its nearest leader by Euclidean distance.
//!
//! Clusters are derived from one matrix and must be recomputed whenever the
//! matrix is rebuilt.

use crate::index::FrequencyMatrix;
use std::fmt;

/// A document attached to a leader
#[derive(Debug, Clone, PartialEq)]
pub struct Follower {
    /// Column index of the document
    pub document: usize,
    /// Euclidean distance to the leader
    pub distance: f64,
}

/// One leader and its followers in ascending document order
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub leader: usize,
    pub followers: Vec<Follower>,
}

/// Every cluster of one clustering run, in leader sampling order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clusters {
    pub groups: Vec<Cluster>,
}

impl Clusters {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl fmt::Display for Clusters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cluster in &self.groups {
            write!(f, "Doc{}:", cluster.leader)?;
            if cluster.followers.is_empty() {
                write!(f, "\tNo followers")?;
            }
            writeln!(f)?;

            for follower in &cluster.followers {
                writeln!(
                    f,
                    "\t\t+ Doc{} (Distance: {:.4})",
                    follower.document, follower.distance
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Clusters the matrix's documents around `k` randomly chosen leaders
///
/// When there are fewer documents than `k`, a warning is logged and `k` is
/// halved; it is then capped at the document count.
///
/// # Arguments
///
/// * `matrix` - The frozen frequency matrix
/// * `k` - Requested number of leaders
/// * `rng` - Source of randomness for leader sampling
pub fn cluster_documents(matrix: &FrequencyMatrix, k: usize, rng: &mut fastrand::Rng) -> Clusters {
    let vectors = normalized_columns(matrix);
    let n = vectors.len();

    let mut k = k;
    if n < k {
        tracing::warn!("Not enough documents to pick {} leaders", k);
        k /= 2;
        tracing::warn!("Clustering around {} leaders", k);
    }
    let k = k.min(n);

    if k == 0 {
        return Clusters::default();
    }

    let leaders = sample_leaders(n, k, rng);
    Clusters {
        groups: assign_followers(&vectors, &leaders),
    }
}

/// Matrix columns scaled to [0, 1] by the global minimum and maximum
fn normalized_columns(matrix: &FrequencyMatrix) -> Vec<Vec<f64>> {
    let columns: Vec<Vec<f64>> = (0..matrix.doc_count())
        .map(|doc| matrix.column(doc).into_iter().map(f64::from).collect())
        .collect();

    let cells = columns.iter().flatten().copied();
    let (min, max) = cells.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    let range = max - min;
    columns
        .into_iter()
        .map(|column| {
            column
                .into_iter()
                .map(|v| if range > 0.0 { (v - min) / range } else { 0.0 })
                .collect()
        })
        .collect()
}

/// Picks `k` distinct indices below `n` (partial Fisher-Yates)
fn sample_leaders(n: usize, k: usize, rng: &mut fastrand::Rng) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    for i in 0..k {
        let j = rng.usize(i..n);
        indices.swap(i, j);
    }
    indices.truncate(k);
    indices
}

fn assign_followers(vectors: &[Vec<f64>], leaders: &[usize]) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = leaders
        .iter()
        .map(|&leader| Cluster {
            leader,
            followers: Vec::new(),
        })
        .collect();

    for (document, vector) in vectors.iter().enumerate() {
        if leaders.contains(&document) {
            continue;
        }

        let mut nearest: Option<(usize, f64)> = None;
        for (slot, &leader) in leaders.iter().enumerate() {
            let distance = euclidean_distance(vector, &vectors[leader]);
            // strict comparison keeps the first leader on ties
            if nearest.map_or(true, |(_, best)| distance < best) {
                nearest = Some((slot, distance));
            }
        }

        if let Some((slot, distance)) = nearest {
            clusters[slot].followers.push(Follower { document, distance });
        }
    }

    clusters
}

fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
