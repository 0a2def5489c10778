//! Properties of the role-permission model

use mediboard_applications::auth::{
    has_all_permissions, has_any_permission, has_permission, permissions_for, AccessContext,
    Permission, Role, StaffDirectory, ALL_PERMISSIONS, ALL_ROLES,
};

#[test]
fn has_permission_agrees_with_the_table() {
    for role in ALL_ROLES {
        let granted = permissions_for(role);
        for permission in ALL_PERMISSIONS {
            assert_eq!(
                has_permission(role, permission),
                granted.contains(&permission),
                "mismatch for role {} permission {}",
                role,
                permission
            );
        }
    }
}

#[test]
fn every_role_has_a_non_empty_set() {
    for role in ALL_ROLES {
        assert!(!permissions_for(role).is_empty());
    }
}

#[test]
fn administrator_covers_every_token() {
    assert!(has_all_permissions(Role::Administrator, &ALL_PERMISSIONS));
}

#[test]
fn empty_input_conventions_are_asymmetric() {
    for role in ALL_ROLES {
        assert!(!has_any_permission(role, &[]));
        assert!(has_all_permissions(role, &[]));
    }
}

#[test]
fn context_queries_delegate_to_the_table() {
    let directory = StaffDirectory::new();

    for account in directory.demo_accounts() {
        let user = directory.find_by_email(&account.email).unwrap().clone();
        let role = user.role;
        let ctx = AccessContext::authenticated(user);

        for permission in ALL_PERMISSIONS {
            assert_eq!(ctx.can(permission), has_permission(role, permission));
            assert_eq!(ctx.cannot(permission), !has_permission(role, permission));
        }
    }
}

#[test]
fn anonymous_context_never_grants() {
    let ctx = AccessContext::anonymous();
    for permission in ALL_PERMISSIONS {
        assert!(!ctx.can(permission));
    }
}

#[test]
fn view_and_manage_split_per_role() {
    // Spot checks that the table reflects the intended job functions
    assert!(has_permission(Role::Doctor, Permission::ManageEhr));
    assert!(!has_permission(Role::Nurse, Permission::ManageEhr));
    assert!(has_permission(Role::Nurse, Permission::ViewEhr));

    assert!(has_permission(Role::Pharmacist, Permission::ManageInventory));
    assert!(has_permission(Role::Billing, Permission::ViewInventory));
    assert!(!has_permission(Role::Billing, Permission::ManageInventory));

    assert!(!has_permission(Role::Patient, Permission::ViewPatients));
    assert!(has_permission(Role::Patient, Permission::ManageAppointments));

    assert!(!has_permission(Role::Nurse, Permission::ViewSystemSettings));
    assert!(has_permission(
        Role::Administrator,
        Permission::ManageSystemSettings
    ));
}
