mod edition_admin;
