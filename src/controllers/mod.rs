// ============================================================================
// Module : controllers
// ============================================================================
// Machines à états de l'interface, sans I/O ni rendu
// ============================================================================

pub mod dashboard;  // Instrument affiché
pub mod search;     // Recherche d'actions avec anti-rebond
pub mod select;     // Dropdown générique

pub use dashboard::{DashboardController, SelectedStock};
pub use search::{DebouncedSearchController, SearchRequest};
pub use select::{KeyOutcome, Navigation, SelectableList};
