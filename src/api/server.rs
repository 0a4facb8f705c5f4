use crate::api::routes;
use crate::config::SharedConfig;
use crate::dls_file::SharedDlsFile;
use crate::error::Error;
use std::future::Future;
use std::net::SocketAddr;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub dls_file: SharedDlsFile,
}

/// Bind the API to [`Config::bind_addr`][crate::config::Config::bind_addr] and return the
/// server future. It runs until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`Error::Server`] if the address can't be bound.
pub fn new(
    config: SharedConfig,
    dls_file: SharedDlsFile,
    shutdown: impl Future<Output = ()>,
) -> Result<impl Future<Output = hyper::Result<()>>, Error> {
    let server = axum::Server::try_bind(&config.bind_addr())?.serve(
        routes::new(AppState { config, dls_file })
            .into_make_service_with_connect_info::<SocketAddr>(),
    );
    Ok(server.with_graceful_shutdown(shutdown))
}
