use crate::config::Config;
use http_handler::function_handler;
use lambda_http::{run, service_fn, tracing, Error};
use shared::adapters::DynamoDbTodoRepository;

mod config;
mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let dynamodb_client = aws_sdk_dynamodb::Client::new(&config);
    let env = Config::load()?;
    let todo_repo = DynamoDbTodoRepository::new(env.table_name, dynamodb_client);

    run(service_fn(|event| function_handler(&todo_repo, event))).await
}
