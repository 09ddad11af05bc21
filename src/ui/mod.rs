// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod events;     // Événements clavier / souris
pub mod layout;     // Zones de l'écran (rendu + hit-testing)
pub mod dashboard;  // Rendu de l'interface principale
pub mod chart;      // Panneau graphique
pub mod news;       // Panneau de news

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};
pub use dashboard::render;
