use thousands::Separable;

/// Counters collected while a search runs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken out of the frontier and expanded.
    pub expanded: usize,
    /// Nodes created, the start included.
    pub generated: usize,
    /// Frontier entries dropped because a better one was pushed later.
    pub stale: usize,
    /// Largest frontier size.
    pub frontier_peak: usize,
    /// Distinct waypoint sets with a computed MST weight.
    pub mst_sets: usize,
    /// MST lookups answered by the cache.
    pub mst_hits: usize,
}

impl SearchStats {
    pub fn write<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        writeln!(out, "Search Stats:")?;
        writeln!(
            out,
            "  - Expanded nodes:  {}",
            self.expanded.separate_with_commas()
        )?;
        writeln!(
            out,
            "  - Generated nodes: {}",
            self.generated.separate_with_commas()
        )?;
        writeln!(
            out,
            "  - Stale entries:   {}",
            self.stale.separate_with_commas()
        )?;
        writeln!(
            out,
            "  - |Open|*:         {}",
            self.frontier_peak.separate_with_commas()
        )?;
        if self.mst_sets > 0 {
            writeln!(
                out,
                "  - MST sets:        {} ({} hits)",
                self.mst_sets.separate_with_commas(),
                self.mst_hits.separate_with_commas()
            )?;
        }
        Ok(())
    }
}

impl std::fmt::Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "expanded={} generated={} stale={} open*={}",
            self.expanded.separate_with_commas(),
            self.generated.separate_with_commas(),
            self.stale.separate_with_commas(),
            self.frontier_peak.separate_with_commas(),
        )?;
        if self.mst_sets > 0 {
            write!(
                f,
                " mst_sets={} mst_hits={}",
                self.mst_sets.separate_with_commas(),
                self.mst_hits.separate_with_commas()
            )?;
        }
        Ok(())
    }
}
