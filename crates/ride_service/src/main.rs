/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use actix_web::{web, App, HttpServer};
use ride_service::{
    domain::api,
    environment::{read_dhall_config, AppState},
    middleware::*,
    tools::{logger::*, prometheus::prometheus_metrics},
};
use std::env::var;
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn start_server() -> std::io::Result<()> {
    let dhall_config_path =
        var("DHALL_CONFIG").unwrap_or_else(|_| "./dhall_config/ride_service.dhall".to_string());
    let app_config = read_dhall_config(&dhall_config_path).unwrap_or_else(|err| {
        println!("Dhall Config Reading Error : {}", err);
        std::process::exit(1);
    });

    let _guard = setup_tracing(app_config.logger_cfg.clone());

    let port = app_config.port;
    let workers = app_config.workers;
    let max_allowed_req_size = app_config.max_allowed_req_size;
    let database_path = app_config.database_cfg.path.clone();

    let app_state = AppState::new(app_config).unwrap_or_else(|err| {
        error!(tag = "[Ride Store Init Failed]", path = %database_path, error = %err);
        std::process::exit(1);
    });
    info!(tag = "[Ride Store Ready]", path = %database_path);

    let data = web::Data::new(app_state);
    let prometheus = prometheus_metrics();

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .app_data(api::json_config(max_allowed_req_size))
            .app_data(api::payload_config(max_allowed_req_size))
            .wrap(LogIncomingRequestBody)
            .wrap(CheckContentLength)
            .wrap(IncomingRequestMetrics)
            .wrap(TracingLogger::<DomainRootSpanBuilder>::new())
            .wrap(prometheus.clone())
            .configure(api::handler)
    })
    .workers(workers)
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

fn main() {
    start_server().expect("Failed to start the server");
}
