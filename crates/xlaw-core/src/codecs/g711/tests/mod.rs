//! G.711 unit tests shared across both laws
