// Fetch layer: one module per backend resource.
// Every function takes the `Transport` seam and returns decoded, typed data;
// nothing here touches list state or rendering.

pub mod alerts;
pub mod applications;
pub mod community;
pub mod curricula;
pub mod favorites;
pub mod jobs;
pub mod links;
pub mod profiles;
