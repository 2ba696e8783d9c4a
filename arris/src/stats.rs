//! Enumeration counters, accumulated during a run and read by the driver.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnumStats {
    pub vertices: usize,
    pub rays: usize,
    pub bases: usize,
    pub facets: usize,
    pub integer_vertices: usize,
    pub max_depth: usize,
    /// Row indices of the last basis visited, for `printcobasis` output.
    pub last_cobasis: Option<Vec<usize>>,
}
