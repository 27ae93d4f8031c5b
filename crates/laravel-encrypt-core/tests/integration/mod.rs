mod laravel_compat;
mod roundtrip;
