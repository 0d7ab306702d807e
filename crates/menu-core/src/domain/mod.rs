//! # Menu Core - Domain Module
//! 
//! Domain entities for the menu tree.

pub mod menu_node;

pub use menu_node::{CreateMenuInput, MenuNode, MenuPath, OrderAssignment, UpdateMenuInput};
