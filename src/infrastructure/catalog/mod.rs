//! External species catalog client

mod http_client;
mod pokeapi;

pub use http_client::{HttpClient, HttpClientTrait};
pub use pokeapi::PokeApiCatalog;
