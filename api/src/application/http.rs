pub mod grocery;
pub mod health;
pub mod meal_plan;
pub mod overrides;
pub mod prakriti;
pub mod recipe;
pub mod server;
#[cfg(test)]
pub mod test;
pub mod workspace;
