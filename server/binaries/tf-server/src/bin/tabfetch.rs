//
// Copyright 2025 Tabs Data Inc.
//

use tabfetchlib::bin::tabfetch::logic;

fn main() {
    logic::run()
}
