use crate::error::BotError;
use crate::shared::{
    dependencies::Dependency,
    usecase::{execute_with_dependencies, DependencyBoundary, UseCase, UseCaseErrorContainer},
};
use actix_web::{web, HttpResponse};
use promptbot_api_structs::setup_month::*;
use promptbot_domain::{InvalidMonthError, MusicMonth};
use promptbot_infra::{fetch_document, BotContext, FetchDocumentError};
use tracing::error;

fn handle_error(e: UseCaseErrors) -> BotError {
    match e {
        UseCaseErrors::NotJsonFile => BotError::BadClientData("Give me a .json file".into()),
        UseCaseErrors::FetchFailed => {
            BotError::BadClientData("Couldn't get the file from the URL provided".into())
        }
        UseCaseErrors::ReadFailed => BotError::BadClientData("Error reading the file bytes".into()),
        UseCaseErrors::InvalidDocument(e) => BotError::BadClientData(format!("Invalid JSON: {}", e)),
        UseCaseErrors::StorageError => BotError::InternalError(
            "Something went wrong at my end so I didn't save the month".into(),
        ),
    }
}

pub async fn setup_month_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<BotContext>,
) -> Result<HttpResponse, BotError> {
    let usecase = SetupMonthUseCase {
        file_url: body.0.file,
    };

    execute_with_dependencies(usecase, &ctx)
        .await
        .map(|month| {
            HttpResponse::Created().json(APIResponse::new(format!(
                "Okay, I've set up a music month beginning on {}",
                month.pretty_start()
            )))
        })
        .map_err(|e| match e {
            UseCaseErrorContainer::Unavailable(feature) => BotError::Unavailable(feature),
            UseCaseErrorContainer::UseCase(e) => handle_error(e),
        })
}

/// Plans a new `MusicMonth` from a JSON document found at `file_url`
#[derive(Debug)]
pub struct SetupMonthUseCase {
    pub file_url: String,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotJsonFile,
    FetchFailed,
    ReadFailed,
    InvalidDocument(InvalidMonthError),
    StorageError,
}

fn is_json_file(url: &str) -> bool {
    // Chat attachment links carry a signature in the query string
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.trim().ends_with(".json")
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetupMonthUseCase {
    type Response = MusicMonth;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BotContext) -> Result<Self::Response, Self::Errors> {
        let repos = ctx.repos.as_ref().ok_or(UseCaseErrors::StorageError)?;

        if !is_json_file(&self.file_url) {
            return Err(UseCaseErrors::NotJsonFile);
        }

        let document = fetch_document(self.file_url.trim())
            .await
            .map_err(|e| match e {
                FetchDocumentError::Fetch(_) => UseCaseErrors::FetchFailed,
                FetchDocumentError::Read(_) => UseCaseErrors::ReadFailed,
            })?;

        let month = MusicMonth::from_document(&document).map_err(UseCaseErrors::InvalidDocument)?;

        repos
            .months
            .insert(&month)
            .await
            .map_err(|e| {
                error!("Unable to save music month: {}. Error: {:?}", month.label(), e);
                UseCaseErrors::StorageError
            })?;
        Ok(month)
    }
}

impl DependencyBoundary for SetupMonthUseCase {
    fn dependencies(&self) -> Vec<Dependency> {
        vec![Dependency::Store]
    }

    fn feature(&self) -> &'static str {
        "music months"
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{mid_january, setup_at};
    use chrono::{TimeZone, Utc};
    use promptbot_domain::MonthQuery;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve(body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/month.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
            .mount(&server)
            .await;
        server
    }

    #[test]
    fn detects_json_files() {
        assert!(is_json_file("https://cdn.example.com/month.json"));
        assert!(is_json_file("https://cdn.example.com/month.json?ex=1&hm=abc"));
        assert!(!is_json_file("https://cdn.example.com/month.txt"));
        assert!(!is_json_file("https://cdn.example.com/json?file=month"));
    }

    #[actix_web::main]
    #[test]
    async fn stores_month_from_document() {
        let ctx = setup_at(mid_january()).ctx;
        let server = serve(
            r#"{"start_time":"2024-01-01T00:00:00Z","days":[{"day":1,"prompt":"Favorite song"}]}"#,
        )
        .await;

        let mut usecase = SetupMonthUseCase {
            file_url: format!("{}/month.json", server.uri()),
        };
        let month = usecase.execute(&ctx).await.unwrap();
        assert_eq!(month.pretty_start(), "January 1, 2024");

        let stored = ctx
            .repos
            .as_ref()
            .unwrap()
            .months
            .find_one(&MonthQuery::most_recent(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()))
            .await
            .unwrap();
        assert_eq!(stored, Some(month));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_bad_documents() {
        let ctx = setup_at(mid_january()).ctx;

        let mut usecase = SetupMonthUseCase {
            file_url: "https://cdn.example.com/month.txt".into(),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseErrors::NotJsonFile)
        ));

        let server = serve("{ not json").await;
        let mut usecase = SetupMonthUseCase {
            file_url: format!("{}/month.json", server.uri()),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseErrors::InvalidDocument(_))
        ));

        let server = serve(
            r#"{"start_time":"2024-01-01T00:00:00Z","days":[{"day":1,"prompt":"a"},{"day":1,"prompt":"b"}]}"#,
        )
        .await;
        let mut usecase = SetupMonthUseCase {
            file_url: format!("{}/month.json", server.uri()),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseErrors::InvalidDocument(InvalidMonthError::DuplicateDay(1)))
        ));

        let mut usecase = SetupMonthUseCase {
            file_url: format!("{}/missing.json", server.uri()),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseErrors::FetchFailed)
        ));
    }
}
