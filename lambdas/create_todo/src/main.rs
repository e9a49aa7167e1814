use crate::config::Config;
use crate::http_handler::HandlerDeps;
use http_handler::function_handler;
use lambda_http::{run, service_fn, tracing, Error};
use shared::adapters::DynamoDbTodoRepository;
use shared::core::CuidGenerator;

mod config;
mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let dynamodb_client = aws_sdk_dynamodb::Client::new(&config);
    let env = Config::load()?;
    let deps = HandlerDeps {
        id_generator: CuidGenerator::new(),
        todo_repo: DynamoDbTodoRepository::new(env.table_name, dynamodb_client),
    };

    run(service_fn(|event| function_handler(&deps, event))).await
}
