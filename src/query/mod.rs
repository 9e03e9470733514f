pub mod clause;
pub mod compiler;

pub use clause::{Clause, CompareOp, WeatherColumn};
pub use compiler::{
    compile_filter, compile_list_all, compile_place_filter, compile_range_filter,
    compile_statistics_query, CompiledQuery, BASE_SCAN,
};
