//! Print the GraphQL schema as SDL

use std::sync::Arc;

use anyhow::Result;
use postgraph_server::graphql::build_schema;
use postgraph_server::MemoryStore;

pub fn run_schema() -> Result<()> {
    // SDL does not depend on the store; an empty one satisfies the builder
    let schema = build_schema(Arc::new(MemoryStore::new()));
    println!("{}", schema.sdl());
    Ok(())
}
