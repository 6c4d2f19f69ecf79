use actix_web::{get, http::header, post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::{
    server::html,
    ui::{SubmitOutcome, UiController},
};

pub const IN_FLIGHT_MESSAGE: &str = "An image is already being generated.";

#[derive(Debug, Deserialize)]
pub struct PromptForm {
    #[serde(default)]
    pub prompt: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(generate_form)
        .service(api_state)
        .service(api_generate)
        .service(download_image);
}

#[get("/")]
async fn index(controller: web::Data<UiController>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html::render_page(&controller.page()))
}

#[post("/generate")]
async fn generate_form(
    controller: web::Data<UiController>,
    form: web::Form<PromptForm>,
) -> impl Responder {
    controller
        .into_inner()
        .spawn_submit_prompt(form.into_inner().prompt);

    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

#[get("/api/state")]
async fn api_state(controller: web::Data<UiController>) -> impl Responder {
    HttpResponse::Ok().json(controller.state().snapshot())
}

#[post("/api/generate")]
async fn api_generate(
    controller: web::Data<UiController>,
    body: web::Json<PromptForm>,
) -> impl Responder {
    let controller = controller.into_inner();

    match controller.spawn_submit_prompt(body.into_inner().prompt) {
        SubmitOutcome::Started(ticket) => HttpResponse::Accepted().json(json!({
            "request_id": ticket.request_id,
            "state": controller.state().snapshot(),
        })),
        SubmitOutcome::Rejected(message) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        SubmitOutcome::Ignored => {
            HttpResponse::Conflict().json(json!({ "error": IN_FLIGHT_MESSAGE }))
        }
    }
}

#[get("/image")]
async fn download_image(controller: web::Data<UiController>) -> impl Responder {
    let Some(image) = controller.current_image() else {
        return HttpResponse::NotFound().finish();
    };

    match image.decode() {
        Ok(bytes) => HttpResponse::Ok().content_type(image.mime_type).body(bytes),
        Err(e) => {
            log::error!("Stored image could not be decoded: {}", e);
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{Result, StudioError},
        gemini::ImageGenerator,
        models::GeneratedImage,
        ui::RequestState,
    };
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Notify;

    struct FixedGenerator {
        answer: Result<GeneratedImage>,
        gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl ImageGenerator for FixedGenerator {
        async fn generate_image(&self, _prompt: &str) -> Result<GeneratedImage> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match &self.answer {
                Ok(image) => Ok(image.clone()),
                Err(e) => Err(StudioError::GenerationError(e.to_string())),
            }
        }
    }

    fn controller(answer: Result<GeneratedImage>, gate: Option<Arc<Notify>>) -> Arc<UiController> {
        Arc::new(UiController::new(Arc::new(FixedGenerator { answer, gate })))
    }

    fn hello_image() -> Result<GeneratedImage> {
        Ok(GeneratedImage::new("aGVsbG8=", "image/jpeg"))
    }

    async fn wait_until_idle(controller: &UiController) {
        for _ in 0..200 {
            if controller.state().request_state() == RequestState::Idle {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("controller never returned to idle");
    }

    #[actix_web::test]
    async fn test_index_renders_placeholder() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(controller(hello_image(), None)))
                .configure(configure),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("Your generated image will appear here."));
    }

    #[actix_web::test]
    async fn test_form_submit_redirects_and_generates() {
        let controller = controller(hello_image(), None);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(controller.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/generate")
            .set_form([("prompt", "a paper boat")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

        wait_until_idle(&controller).await;
        let snapshot = controller.state().snapshot();
        assert_eq!(snapshot.prompt, "a paper boat");
        assert_eq!(snapshot.image.as_deref(), Some("data:image/jpeg;base64,aGVsbG8="));
    }

    #[actix_web::test]
    async fn test_api_generate_rejects_blank_prompt() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(controller(hello_image(), None)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(json!({ "prompt": "  " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Please enter a prompt.");
    }

    #[actix_web::test]
    async fn test_api_generate_conflicts_while_in_flight() {
        let gate = Arc::new(Notify::new());
        let controller = controller(hello_image(), Some(gate.clone()));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(controller.clone()))
                .configure(configure),
        )
        .await;

        let first = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(json!({ "prompt": "one" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, first).await.status(),
            StatusCode::ACCEPTED
        );

        let before = controller.state();
        let second = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(json!({ "prompt": "two" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, second).await.status(),
            StatusCode::CONFLICT
        );
        assert_eq!(controller.state(), before);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains("Conjuring your masterpiece..."));

        gate.notify_one();
        wait_until_idle(&controller).await;
        assert_eq!(controller.state().prompt(), "one");
    }

    #[actix_web::test]
    async fn test_form_submit_while_in_flight_keeps_prompt() {
        let gate = Arc::new(Notify::new());
        let controller = controller(hello_image(), Some(gate.clone()));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(controller.clone()))
                .configure(configure),
        )
        .await;

        for prompt in ["one", "two"] {
            let req = test::TestRequest::post()
                .uri("/generate")
                .set_form([("prompt", prompt)])
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        }
        assert_eq!(controller.state().prompt(), "one");

        gate.notify_one();
        wait_until_idle(&controller).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains(r#"alt="one""#));
        assert!(body.contains(">one</textarea>"));
    }

    #[actix_web::test]
    async fn test_state_reports_generation_error() {
        let controller = controller(Err(StudioError::generation("Quota exceeded")), None);
        controller.edit_prompt("x");
        controller.submit_and_wait().await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(controller))
                .configure(configure),
        )
        .await;
        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/state").to_request(),
        )
        .await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["loading"], false);
        assert_eq!(body["error"], "Failed to generate image: Quota exceeded");
        assert!(body["image"].is_null());
    }

    #[actix_web::test]
    async fn test_image_endpoint() {
        let controller = controller(hello_image(), None);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(controller.clone()))
                .configure(configure),
        )
        .await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/image").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        controller.edit_prompt("x");
        controller.submit_and_wait().await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/image").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/jpeg"
        );
        assert_eq!(test::read_body(resp).await.as_ref(), b"hello");
    }
}
