pub mod error;
pub mod traits;
pub mod types;

pub use error::Error;
pub use traits::{DataSources, OrderTable, ProductCatalog, WeatherTable};
pub use types::{
    ArgumentBag, Order, ParamType, ParameterSpec, Product, ToolDescriptor, WeatherRecord,
};
