use super::*;
use crate::dto::PlayerQuery;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;

pub struct Server;

impl Server {
    pub async fn run(config: Config) -> anyhow::Result<()> {
        let machine = web::Data::new(Machine::boot(&config).await?);
        log::info!("starting gacha server on {}", config.bind);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(machine.clone())
                .configure(routes)
        })
        .workers(config.workers.max(1))
        .bind(&config.bind)?
        .run()
        .await?;
        Ok(())
    }
}

/// Every route the game answers, shared by the server and its tests.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::get().to(register))
        .route("/draw", web::get().to(draw))
        .route("/keep", web::get().to(keep))
        .route("/status", web::get().to(status))
        .route("/support", web::get().to(support))
        .route("/withdraw", web::get().to(withdraw))
        .route("/supporters", web::get().to(supporters))
        .route("/shout", web::get().to(shout))
        .route("/shouts", web::get().to(shouts))
        .route("/health", web::get().to(health));
}

fn respond(reply: anyhow::Result<Reply>) -> HttpResponse {
    match reply {
        Ok(reply) => HttpResponse::build(reply.code())
            .content_type("text/plain; charset=utf-8")
            .body(reply.to_string()),
        Err(e) => {
            log::error!("request failed: {:#}", e);
            HttpResponse::InternalServerError().body("The operation did not complete.")
        }
    }
}

async fn register(machine: web::Data<Machine>, query: web::Query<PlayerQuery>) -> impl Responder {
    match query.player() {
        Some(name) => respond(machine.register(name).await),
        None => respond(Ok(Reply::Invalid)),
    }
}

async fn draw(machine: web::Data<Machine>, query: web::Query<PlayerQuery>) -> impl Responder {
    match query.player() {
        Some(name) => respond(machine.draw(name).await),
        None => respond(Ok(Reply::Invalid)),
    }
}

async fn keep(machine: web::Data<Machine>, query: web::Query<PlayerQuery>) -> impl Responder {
    match query.player() {
        Some(name) => respond(machine.adopt(name).await),
        None => respond(Ok(Reply::Invalid)),
    }
}

async fn status(machine: web::Data<Machine>, query: web::Query<PlayerQuery>) -> impl Responder {
    match query.player() {
        Some(name) => respond(Ok(machine.status(name).await)),
        None => respond(Ok(Reply::Invalid)),
    }
}

async fn support(machine: web::Data<Machine>, query: web::Query<PlayerQuery>) -> impl Responder {
    match query.player() {
        Some(name) => respond(Ok(machine.support(name).await)),
        None => respond(Ok(Reply::Invalid)),
    }
}

async fn withdraw(machine: web::Data<Machine>, query: web::Query<PlayerQuery>) -> impl Responder {
    match query.player() {
        Some(name) => respond(Ok(machine.withdraw(name).await)),
        None => respond(Ok(Reply::Invalid)),
    }
}

async fn shout(machine: web::Data<Machine>, query: web::Query<PlayerQuery>) -> impl Responder {
    match query.player() {
        Some(name) => respond(machine.shout(name, query.message()).await),
        None => respond(Ok(Reply::Invalid)),
    }
}

async fn supporters(machine: web::Data<Machine>) -> impl Responder {
    HttpResponse::Ok().json(machine.supporters().await)
}

async fn shouts(machine: web::Data<Machine>) -> impl Responder {
    match machine.shouts().await {
        Some(shout) => HttpResponse::Ok().json(shout),
        None => HttpResponse::NoContent().finish(),
    }
}

async fn health(machine: web::Data<Machine>) -> impl Responder {
    match machine
        .health()
        .await
        .inspect_err(|e| log::error!("health check failed: {:#}", e))
    {
        Ok(()) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}
