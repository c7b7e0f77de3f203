use libtest_mimic::Arguments;
use libtest_mimic::Trial;
use storify_web::error::Result;

mod operations;

pub use utils::*;

fn main() -> Result<()> {
    let args = Arguments::from_args();

    let app = TEST_RUNTIME.block_on(init_test_service())?;

    let mut tests = Vec::new();

    operations::bucket::tests(&app, &mut tests);
    operations::object::tests(&app, &mut tests);
    operations::transfer::tests(&app, &mut tests);
    operations::single_bucket::tests(&app, &mut tests);
    operations::cli::tests(&app, &mut tests);

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let conclusion = libtest_mimic::run(&args, tests);

    TEST_RUNTIME.block_on(TEST_FIXTURE.cleanup(app.operator()));

    conclusion.exit()
}
