// Life of a request:
// 1. Request comes in
// 2. The gate checks the path against the student zone prefix
// 3. Inside the zone:
//     - Auth disabled: empty 200
//     - Auth enabled: verify the `jwt` cookie, 401 unless it holds a
//       live student token
// 4. Everything else (and allowed zone requests) goes to the page handlers:
//     - /tokenset/<target>: copy the provider token into the cookie, redirect
//     - /clip/<id>: clip page data

pub mod auth;
pub mod config;
pub mod gate;
pub mod routes;
pub mod time;


pub use gate::{GateOutcome, RequestGate};
pub use routes::router;
