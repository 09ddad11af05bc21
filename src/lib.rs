// ============================================================================
// LazyMarket - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;          // Yahoo Finance + GDELT
pub mod app;          // État de l'application
pub mod config;       // Configuration (défauts + variables d'environnement)
pub mod controllers;  // Dashboard, recherche, dropdowns
pub mod models;       // Structures de données
pub mod store;        // Watchlist persistée
pub mod ui;           // Interface utilisateur
pub mod worker;       // Appels réseau en arrière-plan
