use crate::models::UserRole;

/// A gated capability somewhere in the dashboard.
///
/// Every role check in the UI goes through [`UserRole::can`] so the
/// role-to-capability mapping lives in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// See every truck and manifest, not just assigned ones.
    ViewFleet,
    /// Create, edit, and delete trucks.
    ManageTrucks,
    /// Create, edit, and delete manifests.
    ManageManifests,
    /// Assign drivers to trucks and manifests.
    AssignDrivers,
    /// Report the device's GPS position for the assigned truck.
    ReportLocation,
    /// Record departure and arrival on the active manifest.
    RecordTransit,
    /// Manage user accounts (reserved for platform administration).
    ManageAccounts,
}

/// The permission table: which roles may perform each action.
///
/// Dispatcher is fleet-management-equivalent to admin; account
/// administration stays admin-only.
const PERMISSIONS: &[(Action, &[UserRole])] = &[
    (Action::ViewFleet, &[UserRole::Admin, UserRole::Dispatcher]),
    (Action::ManageTrucks, &[UserRole::Admin, UserRole::Dispatcher]),
    (
        Action::ManageManifests,
        &[UserRole::Admin, UserRole::Dispatcher],
    ),
    (
        Action::AssignDrivers,
        &[UserRole::Admin, UserRole::Dispatcher],
    ),
    (Action::ReportLocation, &[UserRole::Driver]),
    (Action::RecordTransit, &[UserRole::Driver]),
    (Action::ManageAccounts, &[UserRole::Admin]),
];

impl UserRole {
    /// Consult the permission table for this role.
    pub fn can(&self, action: Action) -> bool {
        PERMISSIONS
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, roles)| roles.contains(self))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fleet_management_is_admin_and_dispatcher() {
        for action in [
            Action::ViewFleet,
            Action::ManageTrucks,
            Action::ManageManifests,
            Action::AssignDrivers,
        ] {
            assert!(UserRole::Admin.can(action));
            assert!(UserRole::Dispatcher.can(action));
            assert!(!UserRole::Driver.can(action));
        }
    }

    #[test]
    fn location_reporting_is_driver_only() {
        assert!(UserRole::Driver.can(Action::ReportLocation));
        assert!(UserRole::Driver.can(Action::RecordTransit));
        assert!(!UserRole::Admin.can(Action::ReportLocation));
        assert!(!UserRole::Dispatcher.can(Action::RecordTransit));
    }

    #[test]
    fn account_management_is_admin_only() {
        assert!(UserRole::Admin.can(Action::ManageAccounts));
        assert!(!UserRole::Dispatcher.can(Action::ManageAccounts));
        assert!(!UserRole::Driver.can(Action::ManageAccounts));
    }
}
