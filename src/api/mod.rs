//! HTTP API for updating the DLS text file.
//!
//! # API Endpoints
//!
//! ## `/api/dls` (POST)
//!
//!   Requires an `Authorization` header whose value is exactly the configured token, e.g.
//!   `Authorization: mySecretToken`. Requests with a missing or different token get HTTP 401
//!   (Unauthorized) and the target file is left untouched.
//!
//!   The request body is written verbatim to the target file, replacing whatever it held.
//!   Any byte sequence is accepted, there is no size limit and the content type is ignored.
//!
//!   For successful updates, returns HTTP 200 (OK) and a JSON response body of the form:
//!
//!   ```json
//!   {"status":"success","message":"Text successfully updated","lastUpdate":"2024-05-01T12:00:00Z"}
//!   ```
//!
//!   Where `lastUpdate` is the file's modification time, read back from the filesystem after
//!   the write.
//!
//!   Other methods get HTTP 405 (Method Not Allowed). A body that can't be read gets HTTP 400
//!   and a failed write HTTP 500. Error responses are plain text.
//!
//! ## `/api/status` (GET)
//!
//!   No authentication. Returns HTTP 200 (OK) and a JSON body of the form:
//!
//!   ```json
//!   {"status":"online","target":"/dabplus/dls/dls.txt","lastUpdate":"2024-05-01T12:00:00Z"}
//!   ```
//!
//!   `lastUpdate` is `"Never"` if the target file doesn't exist yet, and `"Unknown"` if its
//!   metadata can't be read.
//!
//! ```bash
//! ❯ curl -X POST -H "Authorization: mySecretToken" --data "HELLO WORLD" \
//!     http://localhost:9000/api/dls
//! {"status":"success","message":"Text successfully updated","lastUpdate":"2024-05-01T12:00:00Z"}
//! ```

mod api_error;
mod auth;
mod model;
mod routes;
pub mod server;

pub use server::new;
