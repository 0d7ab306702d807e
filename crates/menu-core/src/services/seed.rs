//! Default menu forest used to populate a fresh store

use tracing::info;

use crate::domain::CreateMenuInput;
use crate::error::DomainError;
use crate::repositories::MenuRepository;
use crate::services::MenuService;

/// Static description of a menu and its children
#[derive(Debug)]
pub struct SeedMenu {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub url: &'static str,
    pub order: i32,
    pub children: &'static [SeedMenu],
}

const fn leaf(
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    url: &'static str,
    order: i32,
) -> SeedMenu {
    SeedMenu { name, description, icon, url, order, children: &[] }
}

pub const DEFAULT_MENUS: &[SeedMenu] = &[
    leaf("Dashboard", "Main dashboard page", "dashboard", "/dashboard", 1),
    SeedMenu {
        name: "User Management",
        description: "User and role management",
        icon: "users",
        url: "/users",
        order: 2,
        children: &[
            leaf("All Users", "View all users", "user-list", "/users/all", 1),
            leaf("Add User", "Create new user", "user-plus", "/users/add", 2),
            leaf("Roles & Permissions", "Manage user roles", "shield", "/users/roles", 3),
        ],
    },
    SeedMenu {
        name: "Settings",
        description: "Application settings",
        icon: "settings",
        url: "/settings",
        order: 3,
        children: &[
            leaf("General Settings", "General application settings", "cog", "/settings/general", 1),
            leaf("Security", "Security settings", "lock", "/settings/security", 2),
            leaf("Integrations", "Third-party integrations", "plug", "/settings/integrations", 3),
        ],
    },
    SeedMenu {
        name: "Reports",
        description: "Analytics and reports",
        icon: "chart",
        url: "/reports",
        order: 4,
        children: &[
            leaf("User Analytics", "User activity reports", "bar-chart", "/reports/users", 1),
            leaf("System Performance", "System performance metrics", "activity", "/reports/performance", 2),
            leaf("Financial Reports", "Financial analytics", "dollar-sign", "/reports/financial", 3),
        ],
    },
];

impl<R: MenuRepository + ?Sized> MenuService<R> {
    /// Replace every menu with `DEFAULT_MENUS`. Returns how many were created.
    pub async fn seed_defaults(&self) -> Result<usize, DomainError> {
        let removed = self.clear_all().await?;
        info!("Seeding default menus ({} existing removed)", removed);

        let mut created = 0;
        let mut pending: Vec<(Option<uuid::Uuid>, &SeedMenu)> =
            DEFAULT_MENUS.iter().rev().map(|m| (None, m)).collect();

        while let Some((parent_id, seed)) = pending.pop() {
            let menu = self
                .create(CreateMenuInput {
                    name: seed.name.to_string(),
                    description: Some(seed.description.to_string()),
                    icon: Some(seed.icon.to_string()),
                    url: Some(seed.url.to_string()),
                    order: Some(seed.order),
                    is_active: Some(true),
                    parent_id,
                })
                .await?;
            created += 1;
            pending.extend(seed.children.iter().rev().map(|child| (Some(menu.id), child)));
        }

        info!("Seeded {} menus", created);
        Ok(created)
    }
}
