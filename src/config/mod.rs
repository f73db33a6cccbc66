pub mod secrets;

pub use secrets::{ EnvSecrets, SecretSource };
