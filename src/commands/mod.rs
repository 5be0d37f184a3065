// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod init;
pub mod catalog;
pub mod transactions;
pub mod stock;
pub mod delivery;
pub mod reports;
pub mod quotes;
pub mod importer;
pub mod exporter;
pub mod desk;
pub mod simulate;
pub mod doctor;
