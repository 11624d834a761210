//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in handset-core for the handset's peripherals:
//!
//! - Heading sensor (BMI160 IMU with a BMM150 magnetometer on its
//!   auxiliary interface)

#![no_std]
#![deny(unsafe_code)]

pub mod sensor;
