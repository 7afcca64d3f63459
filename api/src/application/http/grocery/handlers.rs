pub mod generate_grocery_list;
pub mod get_grocery_categories;
