use std::collections::BTreeMap;

use serde::Serialize;
use sssp::ShortestPaths;

/// Presentation view of one run, keyed by vertex label so both output
/// formats list vertices in sorted order.
#[derive(Debug, Serialize)]
pub struct Report {
    source: String,
    distances: BTreeMap<String, Option<f64>>,
    predecessors: BTreeMap<String, Option<String>>,
    #[serde(skip)]
    routes: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Vec<String>>,
}

impl Report {
    pub fn new(paths: &ShortestPaths<'_, String>, target: Option<&String>) -> sssp::Result<Self> {
        let path = match target {
            Some(t) => Some(paths.path_to(t)?.into_iter().cloned().collect()),
            None => None,
        };
        Ok(Self {
            source: paths.source().clone(),
            distances: paths
                .distances()
                .map(|(v, d)| (v.clone(), d.value()))
                .collect(),
            predecessors: paths
                .predecessors()
                .map(|(v, p)| (v.clone(), p.cloned()))
                .collect(),
            routes: paths
                .distances()
                .filter_map(|(v, _)| {
                    let route = paths.path_to(v).ok()?;
                    Some((v.clone(), route.into_iter().cloned().collect()))
                })
                .collect(),
            path,
        })
    }

    pub fn to_table(&self) -> String {
        let width = self
            .distances
            .keys()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max("vertex".len());
        let shown: Vec<String> = self
            .distances
            .values()
            .map(|d| match d {
                Some(d) => d.to_string(),
                None => "unreachable".to_string(),
            })
            .collect();
        let dist_width = shown
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max("distance".len());

        let mut out = format!("shortest distances from {}\n", self.source);
        out.push_str(&format!(
            "{:<width$}  {:<dist_width$}  path\n",
            "vertex", "distance"
        ));
        for (v, d) in self.distances.keys().zip(&shown) {
            let route = match self.routes.get(v) {
                Some(route) => route.join(" -> "),
                None => "-".to_string(),
            };
            out.push_str(&format!("{v:<width$}  {d:<dist_width$}  {route}\n"));
        }
        if let Some(path) = &self.path {
            out.push_str(&format!("path: {}\n", path.join(" -> ")));
        }
        out.pop();
        out
    }
}
