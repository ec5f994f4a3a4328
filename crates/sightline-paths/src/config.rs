/// Tuning knobs for [`ThetaStar`](crate::ThetaStar).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Expansions after which a node far beyond the distance cap ends the
    /// search.
    pub node_budget: usize,
    /// Maximum pops of the nearest-walkable search.
    pub nearest_budget: usize,
    /// Distance cap multiplier applied to the start–goal Manhattan distance.
    pub distance_factor: i32,
    /// The distance cap never exceeds `rows * cols / area_divisor`.
    pub area_divisor: i32,
    /// Move an unwalkable start to the nearest walkable cell instead of
    /// failing with `InvalidStart`.
    pub relocate_start: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            node_budget: 2000,
            nearest_budget: 1000,
            distance_factor: 3,
            area_divisor: 4,
            relocate_start: false,
        }
    }
}

impl SearchConfig {
    pub fn with_node_budget(mut self, budget: usize) -> Self {
        self.node_budget = budget;
        self
    }

    pub fn with_nearest_budget(mut self, budget: usize) -> Self {
        self.nearest_budget = budget;
        self
    }

    /// Set the distance cap as `factor × Manhattan(start, goal)`, bounded by
    /// `rows * cols / divisor`. A `divisor` below 1 is treated as 1.
    pub fn with_distance_cap(mut self, factor: i32, divisor: i32) -> Self {
        self.distance_factor = factor;
        self.area_divisor = divisor;
        self
    }

    pub fn with_relocate_start(mut self, relocate: bool) -> Self {
        self.relocate_start = relocate;
        self
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let c: SearchConfig = serde_json::from_str(r#"{"node_budget": 50}"#).unwrap();
        assert_eq!(c, SearchConfig::default().with_node_budget(50));
    }

    #[test]
    fn config_round_trip() {
        let c = SearchConfig::default().with_relocate_start(true);
        let json = serde_json::to_string(&c).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
