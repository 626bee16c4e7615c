pub mod use_cases;

pub use use_cases::{
    admin::BulkUserAdmin,
    change_password::{ChangePasswordError, ChangePasswordUseCase},
    login::{LoginError, LoginUseCase},
    logout::{LogoutError, LogoutUseCase},
    profile::{GetProfileUseCase, ProfileError, UpdateProfileError, UpdateProfileUseCase},
    signup::{SignupError, SignupUseCase},
};
