//! Data layer: core types, loading, and the derived views.
//!
//! Architecture:
//! ```text
//!   SN_m_tot_V2.0.csv (Year;Month;Date;Mean;S.D.;Obs;Marker)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse + validate → SunspotTable (immutable)
//!   └──────────┘
//!        │
//!        ├──────────────────────────┐
//!        ▼                          ▼
//!   ┌──────────┐              ┌──────────┐
//!   │  filter   │ year range   │  cycle    │ date mod period → scatter
//!   └──────────┘              └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ smoothing  │ trailing moving average → Option<f64> per row
//!   └───────────┘
//!
//!   images: label → URL, independent of the table
//! ```

pub mod cycle;
pub mod error;
pub mod filter;
pub mod images;
pub mod loader;
pub mod model;
pub mod smoothing;
