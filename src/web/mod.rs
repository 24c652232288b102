//! HTTP JSON API over the inventory repository.
//!
//! Exposes the query surface to the browser-based selection UI (hosted
//! elsewhere): `/api/references`, `/api/colors`, `/api/sizes`, `/api/stock`,
//! `/api/replenishment`, plus `/api/status` and `POST /api/reload` for an
//! explicit new snapshot. Responses carry a permissive
//! `Access-Control-Allow-Origin` header so the UI can call the API directly,
//! the same contract the vendor CSV relay offers.

pub mod server;
